//! In-memory repository implementations used by handler and router tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use skybook_domain::booking::{Booking, BookingWithFlight, SeatRequest};
use skybook_domain::flight::{
    AirportRef, Availability, Flight, FlightDescriptor, Pricing,
};
use skybook_domain::repository::{BookingRepository, FlightRepository, UserRepository};
use skybook_domain::user::{NewUser, User, UserRole};
use skybook_domain::{DomainError, DomainResult};

use crate::state::{AppState, AuthConfig};

/// One struct backs all three repository traits; tests observe a single
/// consistent world.
#[derive(Default)]
pub struct InMemoryStore {
    users: Mutex<Vec<User>>,
    flights: Mutex<HashMap<String, Flight>>,
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryStore {
    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn flight_count(&self) -> usize {
        self.flights.lock().unwrap().len()
    }

    pub fn booking_count(&self) -> usize {
        self.bookings.lock().unwrap().len()
    }

    pub fn find_flight(&self, id: &str) -> Option<Flight> {
        self.flights.lock().unwrap().get(id).cloned()
    }

    pub fn insert_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn insert_flight(&self, flight: Flight) {
        self.flights
            .lock()
            .unwrap()
            .insert(flight.id.clone(), flight);
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_mobile_number(&self, mobile_number: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.mobile_number == mobile_number)
            .cloned())
    }

    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            mobile_number: new_user.mobile_number,
            password_hash: new_user.password_hash,
            role: UserRole::User,
            avatar: None,
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl FlightRepository for InMemoryStore {
    async fn list(&self) -> DomainResult<Vec<Flight>> {
        Ok(self.flights.lock().unwrap().values().cloned().collect())
    }

    async fn find(&self, id: &str) -> DomainResult<Option<Flight>> {
        Ok(self.flights.lock().unwrap().get(id).cloned())
    }

    async fn create(&self, descriptor: FlightDescriptor) -> DomainResult<Flight> {
        let flight = flight_from_descriptor(Uuid::new_v4().to_string(), descriptor);
        self.insert_flight(flight.clone());
        Ok(flight)
    }

    async fn update(&self, id: &str, descriptor: FlightDescriptor) -> DomainResult<Flight> {
        let mut flights = self.flights.lock().unwrap();
        if !flights.contains_key(id) {
            return Err(DomainError::FlightNotFound(id.to_string()));
        }
        let flight = flight_from_descriptor(id.to_string(), descriptor);
        flights.insert(id.to_string(), flight.clone());
        Ok(flight)
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn list_for_user(&self, user_id: Uuid) -> DomainResult<Vec<BookingWithFlight>> {
        let bookings = self.bookings.lock().unwrap();
        let flights = self.flights.lock().unwrap();

        bookings
            .iter()
            .filter(|b| b.user_id == user_id)
            .map(|b| {
                let flight = flights
                    .get(&b.flight_id)
                    .cloned()
                    .ok_or_else(|| DomainError::Storage("missing flight".to_string()))?;
                Ok(BookingWithFlight {
                    booking: b.clone(),
                    flight,
                })
            })
            .collect()
    }

    async fn book_seats(
        &self,
        user_id: Uuid,
        flight_id: &str,
        seats: &SeatRequest,
    ) -> DomainResult<Vec<Booking>> {
        let mut flights = self.flights.lock().unwrap();
        let flight = flights
            .get_mut(flight_id)
            .ok_or_else(|| DomainError::FlightNotFound(flight_id.to_string()))?;

        if !flight.has_capacity(seats) {
            return Err(DomainError::SeatsUnavailable(flight_id.to_string()));
        }

        flight.economy_seats -= seats.economy();
        flight.business_seats -= seats.business();

        let created: Vec<Booking> = seats
            .classes()
            .into_iter()
            .map(|(seat_class, count)| Booking {
                id: Uuid::new_v4(),
                user_id,
                flight_id: flight_id.to_string(),
                seat_class,
                number_of_seats: count,
                booking_date: Utc::now(),
            })
            .collect();

        self.bookings.lock().unwrap().extend(created.clone());
        Ok(created)
    }
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        secret: "test-secret".to_string(),
        expiration: 3600,
    }
}

pub fn test_state() -> (AppState, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::default());
    let state = AppState {
        users: store.clone(),
        flights: store.clone(),
        bookings: store.clone(),
        auth: auth_config(),
    };
    (state, store)
}

pub fn seed_user(store: &InMemoryStore, mobile_number: &str, password: &str, role: UserRole) -> User {
    // Minimum bcrypt cost keeps the test suite fast.
    let user = User {
        id: Uuid::new_v4(),
        name: "Test User".to_string(),
        mobile_number: mobile_number.to_string(),
        password_hash: bcrypt::hash(password, 4).unwrap(),
        role,
        avatar: None,
        created_at: Utc::now(),
    };
    store.insert_user(user.clone());
    user
}

pub fn seed_flight(store: &InMemoryStore, id: &str, economy: i32, business: i32) -> Flight {
    let flight = flight_from_descriptor(id.to_string(), descriptor(economy, business));
    store.insert_flight(flight.clone());
    flight
}

pub fn descriptor(economy: i32, business: i32) -> FlightDescriptor {
    FlightDescriptor {
        airline: "IndiGo".to_string(),
        flight_number: "6E-201".to_string(),
        duration: 2.5,
        flight_status: "Scheduled".to_string(),
        pricing: Pricing {
            base_fare: 3500.0,
            total_fare: 4130.0,
        },
        availability: Availability { economy, business },
        departure_airport: AirportRef {
            code: "BLR".to_string(),
            name: "Kempegowda International".to_string(),
        },
        arrival_airport: AirportRef {
            code: "DEL".to_string(),
            name: "Indira Gandhi International".to_string(),
        },
        departure_date_time: Utc::now(),
        arrival_date_time: Utc::now(),
    }
}

fn flight_from_descriptor(id: String, descriptor: FlightDescriptor) -> Flight {
    let now = Utc::now();
    Flight {
        id,
        airline: descriptor.airline,
        flight_number: descriptor.flight_number,
        departure_airport_code: descriptor.departure_airport.code,
        departure_airport_name: descriptor.departure_airport.name,
        arrival_airport_code: descriptor.arrival_airport.code,
        arrival_airport_name: descriptor.arrival_airport.name,
        departure_date_time: descriptor.departure_date_time,
        arrival_date_time: descriptor.arrival_date_time,
        duration: descriptor.duration,
        base_fare: descriptor.pricing.base_fare,
        total_fare: descriptor.pricing.total_fare,
        economy_seats: descriptor.availability.economy,
        business_seats: descriptor.availability.business,
        flight_status: descriptor.flight_status,
        created_at: now,
        updated_at: now,
    }
}

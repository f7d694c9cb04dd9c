//! engine.rs
//!
//! The booking engine: all mutable state plus the six synchronized operations
//! (purchase, receipt, list-by-section, remove, modify-seat, list-all).
//!
//! One mutex guards the whole state, so every operation is atomic with respect
//! to every other and no caller ever observes a half-applied mutation. Nothing
//! awaits or does I/O under the lock, and the table is expected to stay small,
//! so the coarse lock is the baseline design rather than per-section locking.

pub mod error;

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use tracing::debug;

use crate::config::{PricingConfig, SectionConfig};
use crate::models::{Customer, SeatedCustomer, Section, TicketRecord};
use error::EngineError;

struct Booking {
    customer: Customer,
    ticket: TicketRecord,
}

struct BookingState {
    // Keyed by email, the one business key a customer has. The separate order
    // list keeps iteration in purchase order for the list queries.
    bookings: HashMap<String, Booking>,
    order: Vec<String>,
    seats_left_a: u32,
    seats_left_b: u32,
}

pub struct BookingEngine {
    state: Mutex<BookingState>,
    pricing: PricingConfig,
}

impl BookingEngine {
    pub fn new(sections: SectionConfig, pricing: PricingConfig) -> Self {
        Self {
            state: Mutex::new(BookingState {
                bookings: HashMap::new(),
                order: Vec::new(),
                seats_left_a: sections.capacity_a,
                seats_left_b: sections.capacity_b,
            }),
            pricing,
        }
    }

    /// Allocate a seat and record the ticket. Checks run in a fixed order:
    /// duplicate email, price band, remaining capacity; nothing is mutated
    /// unless all three pass.
    pub fn purchase(
        &self,
        customer: Customer,
        price_paid: u64,
        origin: &str,
        destination: &str,
    ) -> Result<TicketRecord, EngineError> {
        let mut state = self.state.lock().unwrap();

        if state.bookings.contains_key(&customer.email) {
            return Err(EngineError::DuplicateCustomer(customer.email));
        }

        let section = self.section_for_price(price_paid)?;
        let seats_left = match section {
            Section::A => &mut state.seats_left_a,
            Section::B => &mut state.seats_left_b,
        };
        if *seats_left == 0 {
            return Err(EngineError::NoSeatsAvailable(section));
        }

        // The label carries the pre-decrement counter value ("A_5" down to
        // "A_1"). Counters are never restocked on removal, so each value is
        // handed out at most once and labels stay unique for the engine's
        // lifetime.
        let seat = section.seat_label(*seats_left);
        *seats_left -= 1;

        let ticket = TicketRecord {
            origin: origin.to_string(),
            destination: destination.to_string(),
            price_paid,
            seat,
            purchased_at: Utc::now(),
        };

        debug!(email = %customer.email, seat = %ticket.seat, "seat allocated");
        state.order.push(customer.email.clone());
        state.bookings.insert(
            customer.email.clone(),
            Booking {
                customer,
                ticket: ticket.clone(),
            },
        );

        Ok(ticket)
    }

    pub fn receipt(&self, email: &str) -> Result<TicketRecord, EngineError> {
        let state = self.state.lock().unwrap();
        state
            .bookings
            .get(email)
            .map(|booking| booking.ticket.clone())
            .ok_or_else(|| EngineError::CustomerNotFound(email.to_string()))
    }

    /// Customers seated in the given section, in purchase order. The argument
    /// is the raw string from the caller so an unknown section is rejected
    /// here, not at the transport layer.
    pub fn list_section(&self, section: &str) -> Result<Vec<SeatedCustomer>, EngineError> {
        let section: Section = section.parse()?;
        let state = self.state.lock().unwrap();
        Ok(state
            .order
            .iter()
            .filter_map(|email| state.bookings.get(email))
            .filter(|booking| section.matches_label(&booking.ticket.seat))
            .map(|booking| SeatedCustomer {
                customer: booking.customer.clone(),
                seat: booking.ticket.seat.clone(),
            })
            .collect())
    }

    pub fn remove(&self, email: &str) -> Result<(), EngineError> {
        let mut state = self.state.lock().unwrap();
        if state.bookings.remove(email).is_none() {
            return Err(EngineError::CustomerNotFound(email.to_string()));
        }
        state.order.retain(|e| e != email);
        // Inventory is deliberately not restocked: removal permanently shrinks
        // the section's effective capacity, matching the reference deployment.
        debug!(email, "booking removed");
        Ok(())
    }

    /// Overwrite a customer's seat label verbatim. The new label is not
    /// checked against the inventory or the known section prefixes.
    pub fn modify_seat(&self, email: &str, new_seat: &str) -> Result<(), EngineError> {
        let mut state = self.state.lock().unwrap();
        let booking = state
            .bookings
            .get_mut(email)
            .ok_or_else(|| EngineError::CustomerNotFound(email.to_string()))?;
        booking.ticket.seat = new_seat.to_string();
        Ok(())
    }

    pub fn list_all(&self) -> Vec<SeatedCustomer> {
        let state = self.state.lock().unwrap();
        state
            .order
            .iter()
            .filter_map(|email| state.bookings.get(email))
            .map(|booking| SeatedCustomer {
                customer: booking.customer.clone(),
                seat: booking.ticket.seat.clone(),
            })
            .collect()
    }

    pub fn seats_left(&self, section: Section) -> u32 {
        let state = self.state.lock().unwrap();
        match section {
            Section::A => state.seats_left_a,
            Section::B => state.seats_left_b,
        }
    }

    fn section_for_price(&self, price: u64) -> Result<Section, EngineError> {
        if price > self.pricing.band_split {
            Ok(Section::A)
        } else if price >= self.pricing.band_min {
            Ok(Section::B)
        } else {
            Err(EngineError::InvalidPriceRange(price))
        }
    }
}

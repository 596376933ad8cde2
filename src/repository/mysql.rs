use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use crate::models::booking::{Booking, BookingStatus, NewBooking};
use crate::models::flight::{Flight, FlightSearchQuery};
use crate::models::flight_update::{FlightUpdate, NewFlightUpdate};
use crate::models::seat::Seat;
use crate::repository::BookingRepository;
use crate::utils::error::{AppError, AppResult};

const FLIGHT_COLUMNS: &str = "id, airline, flight_number, origin, origin_code, destination, \
    destination_code, departure_time, arrival_time, price, available_seats, aircraft_type, \
    status, gate, delay_minutes";

const BOOKING_COLUMNS: &str = "id, user_id, flight_id, tracking_code, passenger_name, \
    passenger_email, passenger_phone, seat_number, gate, boarding_time, status, total_price, \
    created_at";

pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlRepository { pool }
    }

    /// Writes a flight and its seat map. Used to load schedules into an
    /// empty database.
    pub async fn insert_flight_with_seats(&self, flight: &Flight, seats: &[Seat]) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO flights (id, airline, flight_number, origin, origin_code, destination,
                destination_code, departure_time, arrival_time, price, available_seats,
                aircraft_type, status, gate, delay_minutes)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(flight.id)
        .bind(&flight.airline)
        .bind(&flight.flight_number)
        .bind(&flight.origin)
        .bind(&flight.origin_code)
        .bind(&flight.destination)
        .bind(&flight.destination_code)
        .bind(flight.departure_time)
        .bind(flight.arrival_time)
        .bind(flight.price)
        .bind(flight.available_seats)
        .bind(&flight.aircraft_type)
        .bind(flight.status)
        .bind(&flight.gate)
        .bind(flight.delay_minutes)
        .execute(&mut *tx)
        .await?;

        for seat in seats {
            sqlx::query(
                r#"
                INSERT INTO seat_map (id, flight_id, seat_number, seat_class, is_available,
                    price_modifier, is_window, is_aisle, is_exit_row)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(seat.id)
            .bind(seat.flight_id)
            .bind(&seat.seat_number)
            .bind(seat.seat_class)
            .bind(seat.is_available)
            .bind(seat.price_modifier)
            .bind(seat.is_window)
            .bind(seat.is_aisle)
            .bind(seat.is_exit_row)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for MySqlRepository {
    async fn get_flight(&self, flight_id: Uuid) -> AppResult<Option<Flight>> {
        let flight = sqlx::query_as::<_, Flight>(&format!(
            "SELECT {} FROM flights WHERE id = ?",
            FLIGHT_COLUMNS
        ))
        .bind(flight_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(flight)
    }

    async fn search_flights(&self, query: &FlightSearchQuery) -> AppResult<Vec<Flight>> {
        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {} FROM flights WHERE 1 = 1", FLIGHT_COLUMNS));

        if let Some(origin_code) = &query.origin_code {
            builder.push(" AND origin_code = ").push_bind(origin_code.to_uppercase());
        }
        if let Some(destination_code) = &query.destination_code {
            builder
                .push(" AND destination_code = ")
                .push_bind(destination_code.to_uppercase());
        }
        if let Some(date) = query.departure_date {
            builder.push(" AND DATE(departure_time) = ").push_bind(date);
        }
        builder.push(" ORDER BY departure_time ASC");

        let flights = builder
            .build_query_as::<Flight>()
            .fetch_all(&self.pool)
            .await?;
        Ok(flights)
    }

    async fn list_seats(&self, flight_id: Uuid) -> AppResult<Vec<Seat>> {
        let seats = sqlx::query_as::<_, Seat>(
            r#"
            SELECT id, flight_id, seat_number, seat_class, is_available, price_modifier,
                is_window, is_aisle, is_exit_row
            FROM seat_map
            WHERE flight_id = ?
            ORDER BY seat_number
            "#,
        )
        .bind(flight_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(seats)
    }

    async fn create_booking(&self, booking: NewBooking) -> AppResult<Booking> {
        let stored = Booking {
            id: Uuid::new_v4(),
            user_id: booking.user_id,
            flight_id: booking.flight_id,
            tracking_code: booking.tracking_code,
            passenger_name: booking.passenger_name,
            passenger_email: booking.passenger_email,
            passenger_phone: booking.passenger_phone,
            seat_number: booking.seat_number,
            gate: Some(booking.gate),
            boarding_time: Some(booking.boarding_time),
            status: BookingStatus::Confirmed,
            total_price: booking.total_price,
            created_at: Utc::now(),
        };

        // Single-row insert: either the whole booking lands or nothing does
        sqlx::query(
            r#"
            INSERT INTO bookings (id, user_id, flight_id, tracking_code, passenger_name,
                passenger_email, passenger_phone, seat_number, gate, boarding_time, status,
                total_price, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(stored.id)
        .bind(stored.user_id)
        .bind(stored.flight_id)
        .bind(&stored.tracking_code)
        .bind(&stored.passenger_name)
        .bind(&stored.passenger_email)
        .bind(&stored.passenger_phone)
        .bind(&stored.seat_number)
        .bind(&stored.gate)
        .bind(stored.boarding_time)
        .bind(stored.status)
        .bind(stored.total_price)
        .bind(stored.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(tracking_code = %stored.tracking_code, "inserted booking");
        Ok(stored)
    }

    async fn get_booking_by_code(&self, tracking_code: &str) -> AppResult<Option<Booking>> {
        let booking = sqlx::query_as::<_, Booking>(&format!(
            "SELECT {} FROM bookings WHERE tracking_code = ?",
            BOOKING_COLUMNS
        ))
        .bind(tracking_code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(booking)
    }

    async fn list_recent_updates(&self, flight_id: Uuid, limit: usize) -> AppResult<Vec<FlightUpdate>> {
        let updates = sqlx::query_as::<_, FlightUpdate>(
            r#"
            SELECT id, flight_id, update_type, message, old_value, new_value, created_at
            FROM flight_updates
            WHERE flight_id = ?
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(flight_id)
        .bind(limit as u64)
        .fetch_all(&self.pool)
        .await?;
        Ok(updates)
    }

    async fn update_flight(&self, flight: &Flight) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE flights
            SET status = ?, gate = ?, delay_minutes = ?, departure_time = ?, arrival_time = ?,
                available_seats = ?
            WHERE id = ?
            "#,
        )
        .bind(flight.status)
        .bind(&flight.gate)
        .bind(flight.delay_minutes)
        .bind(flight.departure_time)
        .bind(flight.arrival_time)
        .bind(flight.available_seats)
        .bind(flight.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Flight not found".into()));
        }
        Ok(())
    }

    async fn insert_flight_update(&self, update: NewFlightUpdate) -> AppResult<FlightUpdate> {
        let stored = FlightUpdate {
            id: Uuid::new_v4(),
            flight_id: update.flight_id,
            update_type: update.update_type,
            message: update.message,
            old_value: update.old_value,
            new_value: update.new_value,
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO flight_updates (id, flight_id, update_type, message, old_value, new_value,
                created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(stored.id)
        .bind(stored.flight_id)
        .bind(stored.update_type)
        .bind(&stored.message)
        .bind(&stored.old_value)
        .bind(&stored.new_value)
        .bind(stored.created_at)
        .execute(&self.pool)
        .await?;

        Ok(stored)
    }
}

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::config::DatabaseConfig;

// Tables of the hosted store. push_subscriptions is part of the schema but
// nothing in the service writes to it.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS flights (
        id BINARY(16) NOT NULL PRIMARY KEY,
        airline VARCHAR(255) NOT NULL,
        flight_number VARCHAR(16) NOT NULL,
        origin VARCHAR(255) NOT NULL,
        origin_code CHAR(3) NOT NULL,
        destination VARCHAR(255) NOT NULL,
        destination_code CHAR(3) NOT NULL,
        departure_time TIMESTAMP NOT NULL,
        arrival_time TIMESTAMP NOT NULL,
        price DECIMAL(12,2) NOT NULL,
        available_seats INT NOT NULL DEFAULT 0,
        aircraft_type VARCHAR(64) NOT NULL DEFAULT '',
        status ENUM('scheduled', 'boarding', 'departed', 'in_flight', 'landed', 'delayed', 'cancelled')
            DEFAULT 'scheduled' NOT NULL,
        gate VARCHAR(16) NULL,
        delay_minutes INT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP NOT NULL,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP NOT NULL,
        INDEX flights_departure_time_index (departure_time)
    )",
    "CREATE TABLE IF NOT EXISTS seat_map (
        id BINARY(16) NOT NULL PRIMARY KEY,
        flight_id BINARY(16) NOT NULL,
        seat_number VARCHAR(4) NOT NULL,
        seat_class ENUM('first', 'business', 'economy') DEFAULT 'economy' NOT NULL,
        is_available BOOLEAN DEFAULT TRUE NOT NULL,
        price_modifier DECIMAL(6,3) DEFAULT 1.000 NOT NULL,
        is_window BOOLEAN DEFAULT FALSE NOT NULL,
        is_aisle BOOLEAN DEFAULT FALSE NOT NULL,
        is_exit_row BOOLEAN DEFAULT FALSE NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP NOT NULL,
        CONSTRAINT seat_map_flight_seat_uindex UNIQUE (flight_id, seat_number),
        CONSTRAINT seat_map_flights_id_fk
            FOREIGN KEY (flight_id) REFERENCES flights(id)
            ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS bookings (
        id BINARY(16) NOT NULL PRIMARY KEY,
        user_id BINARY(16) NULL,
        flight_id BINARY(16) NOT NULL,
        tracking_code CHAR(8) NOT NULL,
        passenger_name VARCHAR(255) NOT NULL,
        passenger_email VARCHAR(255) NOT NULL,
        passenger_phone VARCHAR(32) NULL,
        seat_number VARCHAR(4) NOT NULL,
        gate VARCHAR(16) NULL,
        boarding_time TIMESTAMP NULL,
        status ENUM('confirmed', 'checked-in', 'boarded', 'completed', 'cancelled')
            DEFAULT 'confirmed' NOT NULL,
        total_price DECIMAL(14,5) NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP NOT NULL,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP NOT NULL,
        CONSTRAINT bookings_tracking_code_uindex UNIQUE (tracking_code),
        CONSTRAINT bookings_flights_id_fk
            FOREIGN KEY (flight_id) REFERENCES flights(id)
    )",
    "CREATE TABLE IF NOT EXISTS flight_updates (
        id BINARY(16) NOT NULL PRIMARY KEY,
        flight_id BINARY(16) NOT NULL,
        update_type ENUM('delay', 'gate_change', 'status_change', 'other') NOT NULL,
        message TEXT NOT NULL,
        old_value VARCHAR(255) NULL,
        new_value VARCHAR(255) NULL,
        created_at TIMESTAMP(6) DEFAULT CURRENT_TIMESTAMP(6) NOT NULL,
        INDEX flight_updates_flight_created_index (flight_id, created_at),
        CONSTRAINT flight_updates_flights_id_fk
            FOREIGN KEY (flight_id) REFERENCES flights(id)
            ON DELETE CASCADE
    )",
    "CREATE TABLE IF NOT EXISTS push_subscriptions (
        id BINARY(16) NOT NULL PRIMARY KEY,
        user_id BINARY(16) NULL,
        booking_id BINARY(16) NULL,
        email VARCHAR(255) NOT NULL,
        is_active BOOLEAN DEFAULT TRUE NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP NOT NULL
    )",
];

// Database connection manager
pub struct Database {
    pub pool: MySqlPool,
}

impl Database {
    // Create a new database connection pool
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await?;

        tracing::info!(max_connections = config.max_connections, "connected to MySQL");
        Ok(Database { pool })
    }

    /// Creates any missing table. Existing tables are left untouched.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        for create_sql in SCHEMA {
            sqlx::query(create_sql).execute(&self.pool).await?;
        }
        Ok(())
    }

    // Get a reference to the connection pool
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }
}

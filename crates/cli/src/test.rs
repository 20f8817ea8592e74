//! In-memory stand-ins for the database and the terminal.

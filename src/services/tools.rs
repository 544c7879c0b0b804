//! The two operations the voice agent's LLM can call. Every outcome,
//! including failures, is folded into a single line it can read back.

use serde_json::{json, Value};

use crate::errors::BookingError;
use crate::models::booking::format_date;
use crate::models::{CheckAvailabilityArgs, CreateBookingArgs};
use crate::services::booking::{BookingEngine, NewBooking};

pub const CHECK_AVAILABILITY: &str = "check_availability_tool";
pub const CREATE_BOOKING: &str = "create_booking_tool";

pub async fn check_availability_tool(engine: &BookingEngine, args: &CheckAvailabilityArgs) -> String {
    match engine
        .check_availability(&args.check_in, &args.check_out)
        .await
    {
        Ok(availability) => availability.as_str().to_string(),
        Err(e) => error_reply(CHECK_AVAILABILITY, &e),
    }
}

pub async fn create_booking_tool(engine: &BookingEngine, args: CreateBookingArgs) -> String {
    let new = NewBooking {
        guests: args.guests,
        room_type: args.room_type,
        contact: args.contact,
        ..NewBooking::new(&args.name, &args.check_in, &args.check_out)
    };

    match engine.create_booking(new).await {
        Ok(booking) => format!(
            "BOOKED: {} | {} -> {}",
            booking.booking_id,
            format_date(&booking.check_in),
            format_date(&booking.check_out),
        ),
        Err(e) => error_reply(CREATE_BOOKING, &e),
    }
}

fn error_reply(tool: &str, err: &BookingError) -> String {
    match err {
        BookingError::DateParse(_) | BookingError::Validation(_) => {
            tracing::warn!(tool, error = %err, "rejected tool arguments");
        }
        BookingError::Store(cause) => {
            tracing::error!(tool, error = %cause, "booking store failure");
        }
    }
    format!("ERROR: {}", err.tool_message())
}

/// Function declarations in the JSON-schema shape LLM tool-calling APIs expect.
pub fn tool_declarations() -> Value {
    json!([
        {
            "name": CHECK_AVAILABILITY,
            "description": "Check whether a room is free for the stay. Returns AVAILABLE, NOT_AVAILABLE or ERROR: <message>.",
            "parameters": {
                "type": "object",
                "properties": {
                    "check_in": { "type": "string", "description": "Check-in date, YYYY-MM-DD or as the guest said it" },
                    "check_out": { "type": "string", "description": "Check-out date, YYYY-MM-DD or as the guest said it" }
                },
                "required": ["check_in", "check_out"]
            }
        },
        {
            "name": CREATE_BOOKING,
            "description": "Record a confirmed booking once the guest has agreed. Returns BOOKED: <booking_id> | <check_in> -> <check_out> or ERROR: <message>.",
            "parameters": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Guest name" },
                    "check_in": { "type": "string", "description": "Check-in date" },
                    "check_out": { "type": "string", "description": "Check-out date" },
                    "guests": { "type": "string", "description": "Number of guests" },
                    "room_type": { "type": "string", "description": "Requested room type" },
                    "contact": { "type": "string", "description": "Phone number or email" }
                },
                "required": ["name", "check_in", "check_out"]
            }
        }
    ])
}

//! Order status transition rules
//!
//! The graph is intentionally permissive: the seller drives a flat status
//! enum and may move a pending order directly to any later stage,
//! including `delivered`. Two rules are enforced:
//!
//! - terminal statuses (`delivered`, `cancelled`) accept no further
//!   transitions, except `delivered` → `delivered` which restamps the
//!   delivery time with the most recent value;
//! - `cancelled` is never a `set_status` target; cancellation goes
//!   through the cancel action so stock compensation always runs.

use crate::db::models::OrderStatus;

/// Statuses from which no further transition is permitted
pub fn is_terminal(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Delivered | OrderStatus::Cancelled)
}

/// Whether `set_status` may move an order from `from` to `to`
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    match (from, to) {
        (OrderStatus::Delivered, OrderStatus::Delivered) => true,
        (from, _) if is_terminal(from) => false,
        (_, OrderStatus::Cancelled) => false,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::OrderStatus::*;

    #[test]
    fn test_pending_reaches_every_stage() {
        for to in [Accepted, Rejected, Processing, ReadyForPickup, InTransit, Delivered] {
            assert!(can_transition(Pending, to), "pending -> {to}");
        }
    }

    #[test]
    fn test_cancelled_is_not_a_set_status_target() {
        for from in [Pending, Accepted, Processing, InTransit] {
            assert!(!can_transition(from, Cancelled), "{from} -> cancelled");
        }
    }

    #[test]
    fn test_terminal_states_are_frozen() {
        for to in [Pending, Accepted, Processing, InTransit] {
            assert!(!can_transition(Delivered, to), "delivered -> {to}");
            assert!(!can_transition(Cancelled, to), "cancelled -> {to}");
        }
        assert!(!can_transition(Cancelled, Delivered));
    }

    #[test]
    fn test_delivered_can_be_restamped() {
        assert!(can_transition(Delivered, Delivered));
    }

    #[test]
    fn test_backwards_jumps_are_permitted() {
        // the seller may correct a mis-set stage
        assert!(can_transition(InTransit, Processing));
        assert!(can_transition(Accepted, Pending));
    }
}

//! # Funnel Analytics
//!
//! Event records written by the frontend at each funnel step, reduced into
//! the aggregate numbers the admin dashboard polls for.
//!
//! Session ids are generated client-side and treated as opaque strings.
//! Timestamps are assigned server-side on record.
use std::collections::{HashMap, HashSet};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    QuizStart,
    QuizProgress,
    QuizComplete,
    ViewResult,
    ClickCheckout,
    PaymentConfirmed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunnelEvent {
    pub session_id: String,
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    pub timestamp_ms: i64,
}

impl FunnelEvent {
    pub fn now(session_id: String, event_type: EventType, payload: Option<Value>) -> Self {
        Self {
            session_id,
            event_type,
            payload,
            timestamp_ms: Utc::now().timestamp_millis(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct FunnelMetrics {
    pub total_sessions: usize,
    pub starts: usize,
    pub completes: usize,
    pub completion_rate: u32,
    pub question_stats: HashMap<u8, u32>,
    pub checkouts: usize,
    pub payments: usize,
    pub checkout_conversion: u32,
    pub checkout_clicks: u64,
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }

    ((part as f64 / whole as f64) * 100.0).round() as u32
}

fn count(events: &[FunnelEvent], event_type: EventType) -> usize {
    events.iter().filter(|e| e.event_type == event_type).count()
}

pub fn compute_metrics(events: &[FunnelEvent], checkout_clicks: u64) -> FunnelMetrics {
    let total_sessions = events
        .iter()
        .map(|e| e.session_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let starts = count(events, EventType::QuizStart);
    let completes = count(events, EventType::QuizComplete);
    let checkouts = count(events, EventType::ClickCheckout);
    let payments = count(events, EventType::PaymentConfirmed);

    let mut question_stats: HashMap<u8, u32> = HashMap::new();
    for event in events
        .iter()
        .filter(|e| e.event_type == EventType::QuizProgress)
    {
        let question_id = event
            .payload
            .as_ref()
            .and_then(|payload| payload.get("questionId"))
            .and_then(Value::as_u64);

        if let Some(id) = question_id.filter(|id| (1..=u8::MAX as u64).contains(id)) {
            *question_stats.entry(id as u8).or_insert(0) += 1;
        }
    }

    FunnelMetrics {
        total_sessions,
        starts,
        completes,
        completion_rate: percent(completes, starts),
        question_stats,
        checkouts,
        payments,
        checkout_conversion: percent(checkouts, completes),
        checkout_clicks,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn event(session: &str, event_type: EventType) -> FunnelEvent {
        FunnelEvent::now(session.to_string(), event_type, None)
    }

    fn progress(session: &str, question_id: u8) -> FunnelEvent {
        FunnelEvent::now(
            session.to_string(),
            EventType::QuizProgress,
            Some(json!({ "questionId": question_id })),
        )
    }

    #[test]
    fn empty_log_yields_zeroes() {
        let metrics = compute_metrics(&[], 0);

        assert_eq!(metrics.total_sessions, 0);
        assert_eq!(metrics.completion_rate, 0);
        assert_eq!(metrics.checkout_conversion, 0);
    }

    #[test]
    fn sessions_are_counted_once_across_event_types() {
        let events = [
            event("a", EventType::QuizStart),
            event("a", EventType::QuizComplete),
            event("b", EventType::QuizStart),
        ];

        let metrics = compute_metrics(&events, 0);

        assert_eq!(metrics.total_sessions, 2);
        assert_eq!(metrics.starts, 2);
        assert_eq!(metrics.completes, 1);
    }

    #[test]
    fn rates_are_rounded_integer_percents() {
        let events = [
            event("a", EventType::QuizStart),
            event("b", EventType::QuizStart),
            event("c", EventType::QuizStart),
            event("a", EventType::QuizComplete),
            event("b", EventType::QuizComplete),
            event("a", EventType::ClickCheckout),
        ];

        let metrics = compute_metrics(&events, 0);

        // 2/3 completes, 1/2 checkouts
        assert_eq!(metrics.completion_rate, 67);
        assert_eq!(metrics.checkout_conversion, 50);
    }

    #[test]
    fn question_stats_key_on_payload_question_id() {
        let events = [
            progress("a", 1),
            progress("a", 2),
            progress("b", 1),
            FunnelEvent::now("c".to_string(), EventType::QuizProgress, None),
        ];

        let metrics = compute_metrics(&events, 0);

        assert_eq!(metrics.question_stats.get(&1), Some(&2));
        assert_eq!(metrics.question_stats.get(&2), Some(&1));
        assert_eq!(metrics.question_stats.len(), 2);
    }

    #[test]
    fn click_counter_is_reported_verbatim() {
        let metrics = compute_metrics(&[], 42);

        assert_eq!(metrics.checkout_clicks, 42);
    }

    #[test]
    fn event_types_serialize_snake_case() {
        let encoded = serde_json::to_string(&EventType::ClickCheckout).unwrap();

        assert_eq!(encoded, "\"click_checkout\"");
    }
}

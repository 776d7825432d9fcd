//! Admin-channel notification for newly placed orders.

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::Order;

const SUBJECT: &str = "boutique.orders.placed";

#[derive(Serialize)]
struct OrderPlaced<'a> {
    order_id: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    total: f64,
    customer: &'a str,
    phone: &'a str,
}

/// Publishes order events to NATS when a connection is configured;
/// otherwise the event only lands in the log. Notification is best-effort
/// by contract: a lost event never fails a checkout.
#[derive(Clone, Default)]
pub struct AdminNotifier {
    client: Option<async_nats::Client>,
}

impl AdminNotifier {
    pub fn disabled() -> Self {
        Self::default()
    }

    /// `None` and a failed connection both yield a disabled notifier.
    pub async fn connect(url: Option<&str>) -> Self {
        let client = match url {
            Some(url) => match async_nats::connect(url).await {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!(error = %e, "nats unreachable, admin notifications disabled");
                    None
                }
            },
            None => None,
        };
        Self { client }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    pub async fn order_placed(&self, order: &Order) {
        info!(order_id = %order.id, kind = order.kind.as_str(), total = order.total, "order placed");
        let Some(client) = &self.client else {
            return;
        };
        let event = OrderPlaced {
            order_id: &order.id,
            kind: order.kind.as_str(),
            total: order.total,
            customer: &order.user.name,
            phone: &order.user.phone,
        };
        let Ok(payload) = serde_json::to_vec(&event) else {
            return;
        };
        if let Err(e) = client.publish(SUBJECT.to_string(), payload.into()).await {
            warn!(error = %e, order_id = %order.id, "order notification not delivered");
        }
    }
}

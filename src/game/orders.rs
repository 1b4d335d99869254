//! Tank orders.
//!
//! Players submit loosely typed [`WireOrder`]s. A batch is only accepted when
//! every order is well formed, targets a tank the player owns, and no tank is
//! ordered twice; otherwise the whole batch is dropped.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::game::types::{Direction, TankId};

/// What a tank should do this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    Move,
    TurnTo(Direction),
    Fire(Direction),
}

/// A validated order for one tank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TankOrder {
    pub tank_id: TankId,
    pub kind: OrderKind,
}

impl TankOrder {
    pub fn new(tank_id: TankId, kind: OrderKind) -> Self {
        Self { tank_id, kind }
    }

    pub fn moving(tank_id: TankId) -> Self {
        Self::new(tank_id, OrderKind::Move)
    }

    pub fn turn_to(tank_id: TankId, dir: Direction) -> Self {
        Self::new(tank_id, OrderKind::TurnTo(dir))
    }

    pub fn fire(tank_id: TankId, dir: Direction) -> Self {
        Self::new(tank_id, OrderKind::Fire(dir))
    }
}

/// An order as received from a player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireOrder {
    pub tank_id: TankId,
    pub order: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<Direction>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("unknown order '{order}' for tank {tank_id}")]
    UnknownKind { tank_id: TankId, order: String },

    #[error("order '{order}' for tank {tank_id} needs a direction")]
    MissingDirection { tank_id: TankId, order: String },
}

impl TryFrom<WireOrder> for TankOrder {
    type Error = OrderError;

    fn try_from(wire: WireOrder) -> Result<Self, Self::Error> {
        let WireOrder { tank_id, order, dir } = wire;
        let kind = match (order.as_str(), dir) {
            ("move", _) => OrderKind::Move,
            ("turnTo", Some(dir)) => OrderKind::TurnTo(dir),
            ("fire", Some(dir)) => OrderKind::Fire(dir),
            ("turnTo" | "fire", None) => return Err(OrderError::MissingDirection { tank_id, order }),
            _ => return Err(OrderError::UnknownKind { tank_id, order }),
        };
        Ok(TankOrder::new(tank_id, kind))
    }
}

impl From<TankOrder> for WireOrder {
    fn from(order: TankOrder) -> Self {
        let (name, dir) = match order.kind {
            OrderKind::Move => ("move", None),
            OrderKind::TurnTo(dir) => ("turnTo", Some(dir)),
            OrderKind::Fire(dir) => ("fire", Some(dir)),
        };
        Self {
            tank_id: order.tank_id,
            order: name.to_string(),
            dir,
        }
    }
}

/// Why a whole batch was thrown away.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchRejection {
    #[error("tried to control tank {0} it does not own")]
    NotOwned(TankId),

    #[error("sent more than one order for tank {0}")]
    Duplicate(TankId),

    #[error(transparent)]
    Malformed(#[from] OrderError),
}

/// Check one player's batch against the tanks it owns.
pub fn validate_batch(
    owned: &BTreeSet<TankId>,
    batch: Vec<WireOrder>,
) -> Result<Vec<TankOrder>, BatchRejection> {
    if let Some(order) = batch.iter().find(|o| !owned.contains(&o.tank_id)) {
        return Err(BatchRejection::NotOwned(order.tank_id));
    }

    let mut seen = BTreeSet::new();
    if let Some(order) = batch.iter().find(|o| !seen.insert(o.tank_id)) {
        return Err(BatchRejection::Duplicate(order.tank_id));
    }

    batch
        .into_iter()
        .map(|order| TankOrder::try_from(order).map_err(BatchRejection::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(tank_id: TankId, order: &str, dir: Option<Direction>) -> WireOrder {
        WireOrder { tank_id, order: order.to_string(), dir }
    }

    fn owned() -> BTreeSet<TankId> {
        [1, 2, 3].into_iter().collect()
    }

    #[test]
    fn accepts_well_formed_batch_in_order() {
        let batch = vec![
            wire(2, "fire", Some(Direction::Left)),
            wire(1, "move", None),
            wire(3, "turnTo", Some(Direction::Up)),
        ];
        let orders = validate_batch(&owned(), batch).expect("valid batch");
        assert_eq!(
            orders,
            vec![
                TankOrder::fire(2, Direction::Left),
                TankOrder::moving(1),
                TankOrder::turn_to(3, Direction::Up),
            ]
        );
    }

    #[test]
    fn move_ignores_a_direction() {
        let order = TankOrder::try_from(wire(1, "move", Some(Direction::Up))).unwrap();
        assert_eq!(order.kind, OrderKind::Move);
    }

    #[test]
    fn rejects_enemy_tank() {
        let batch = vec![wire(1, "move", None), wire(6, "move", None)];
        assert_eq!(validate_batch(&owned(), batch), Err(BatchRejection::NotOwned(6)));
    }

    #[test]
    fn rejects_duplicate_tank() {
        let batch = vec![wire(1, "move", None), wire(1, "fire", Some(Direction::Up))];
        assert_eq!(validate_batch(&owned(), batch), Err(BatchRejection::Duplicate(1)));
    }

    #[test]
    fn rejects_malformed_orders() {
        let batch = vec![wire(1, "move", None), wire(2, "fire", None)];
        assert!(matches!(
            validate_batch(&owned(), batch),
            Err(BatchRejection::Malformed(OrderError::MissingDirection { tank_id: 2, .. }))
        ));

        let batch = vec![wire(3, "jump", None)];
        assert!(matches!(
            validate_batch(&owned(), batch),
            Err(BatchRejection::Malformed(OrderError::UnknownKind { tank_id: 3, .. }))
        ));
    }

    #[test]
    fn wire_shape_uses_protocol_names() {
        let json = serde_json::to_string(&WireOrder::from(TankOrder::turn_to(4, Direction::Right))).unwrap();
        assert_eq!(json, r#"{"tank_id":4,"order":"turnTo","dir":"RIGHT"}"#);

        let parsed: WireOrder = serde_json::from_str(r#"{"tank_id":1,"order":"move"}"#).unwrap();
        assert_eq!(parsed, wire(1, "move", None));
    }
}

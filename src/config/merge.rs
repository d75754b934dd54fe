// PushGuardian: Git hooks quality gate and repository mirroring
//
// SPDX-FileCopyrightText: 2026 PushGuardian contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! JSON document merging.
//!
//! ```text
//! existing {a, hooks{x}, install{hooks}} + update {install{mirroring}, mirroring}
//!   --> {a, hooks{x}, install{hooks, mirroring}, mirroring}
//! ```
//!
//! Objects merge key by key; any other value in the update replaces the
//! existing one.

use serde_json::Value;

/// Merge `update` into `base` in place.
pub fn merge_json(base: &mut Value, update: Value) {
    match (base, update) {
        (Value::Object(base_map), Value::Object(update_map)) => {
            for (key, value) in update_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, update) => *base = update,
    }
}

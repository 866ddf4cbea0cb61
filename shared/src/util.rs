use std::collections::HashSet;

use rand::Rng;

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate an id for a record created without the server.
///
/// `now_millis() + random [0, 100000)`. Not globally unique across devices,
/// but it shares the `i64` space with server sequence numbers.
pub fn local_id() -> i64 {
    let rand_part: i64 = rand::thread_rng().gen_range(0..100_000);
    now_millis() + rand_part
}

/// Same as [`local_id`], regenerated until it is not in `existing`.
pub fn local_id_avoiding(existing: &HashSet<i64>) -> i64 {
    loop {
        let id = local_id();
        if !existing.contains(&id) {
            return id;
        }
    }
}

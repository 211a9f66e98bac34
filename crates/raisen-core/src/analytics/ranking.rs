//! Top-N leaderboards

/// First `n` items by `key`, highest first
///
/// The sort is stable: equal keys keep their input order, so a leaderboard
/// never reshuffles between renders of the same data.
pub fn top_n<T, K, F>(items: &[T], n: usize, key: F) -> Vec<&T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut ranked: Vec<&T> = items.iter().collect();
    ranked.sort_by(|a, b| key(*b).cmp(&key(*a)));
    ranked.truncate(n);
    ranked
}

/// [`top_n`] for floating-point keys such as engagement rates
///
/// NaN ranks below every number; ties keep input order.
pub fn top_n_by_f64<T, F>(items: &[T], n: usize, key: F) -> Vec<&T>
where
    F: Fn(&T) -> f64,
{
    let rank_key = |item: &T| {
        let value = key(item);
        if value.is_nan() {
            f64::NEG_INFINITY
        } else {
            value
        }
    };

    let mut ranked: Vec<&T> = items.iter().collect();
    ranked.sort_by(|a, b| rank_key(*b).total_cmp(&rank_key(*a)));
    ranked.truncate(n);
    ranked
}

//! Rendering contract for score fields.
//!
//! Any shell that displays a [`ScoreResult`](crate::scoring::ScoreResult)
//! renders cost as a currency-formatted integer, efficiency as a
//! percentage with one decimal, and eco-score as a percentage with none.

/// Group an integer into thousands: `4350` → `"4,350"`.
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Cost as displayed on the panel: `"$4,350"`.
pub fn format_cost(cost: u32) -> String {
    format!("${}", group_thousands(cost))
}

/// Efficiency as displayed on the panel: `"56.0%"`.
pub fn format_efficiency(efficiency: f32) -> String {
    format!("{:.1}%", efficiency)
}

/// Eco-score as displayed on the panel: `"80%"`.
pub fn format_eco_score(eco_score: u8) -> String {
    format!("{}%", eco_score)
}

// Valores monetários em centavos (minor units)

/// Formats minor units as rand, e.g. `2550` -> `R25.50`.
pub fn format_rand(amount_in_cents: u64) -> String {
    format!("R{}.{:02}", amount_in_cents / 100, amount_in_cents % 100)
}

/// Rounding helpers shared by the calculators.
///
/// Values round from their exact binary representation, with exact halfway
/// cases going to the even neighbour, so reported values match the upstream
/// dashboard figures.
pub struct Rounding;

impl Rounding {
    /// Round to a fixed number of decimal places
    pub fn to_decimals(value: f64, decimals: usize) -> f64 {
        // Float formatting rounds the exact stored value; scaling first would
        // round an already rounded product (40.15 * 10 == 401.5)
        format!("{value:.decimals$}")
            .parse::<f64>()
            .map_or(value, |rounded| rounded + 0.0)
    }

    /// Round a share to a whole percentage
    pub fn to_percent(numerator: u64, denominator: u64) -> u32 {
        if denominator == 0 {
            return 0;
        }
        (numerator as f64 / denominator as f64 * 100.0).round_ties_even() as u32
    }
}

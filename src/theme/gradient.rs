//! Gradient CSS generation.

use crate::content::Gradient;

/// CSS expression for one section gradient.
///
/// Stops are evenly spaced: color `i` of `N` sits at `i/(N-1)*100` percent,
/// so the first color is at 0% and the last at 100%. A single color sits
/// alone at 100%. Percentages print without trailing zeros. Returns `None`
/// when the gradient has no direction or no colors.
pub fn gradient_css(gradient: &Gradient) -> Option<String> {
    if gradient.direction.is_empty() || gradient.colors.is_empty() {
        return None;
    }

    let count = gradient.colors.len();
    let stops: Vec<String> = gradient
        .colors
        .iter()
        .enumerate()
        .map(|(i, color)| {
            let percent = if count == 1 {
                100.0
            } else {
                (i as f64 / (count - 1) as f64) * 100.0
            };
            format!("{color} {percent}%")
        })
        .collect();

    Some(format!(
        "linear-gradient({}, {})",
        gradient.direction,
        stops.join(", ")
    ))
}

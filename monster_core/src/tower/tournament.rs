//! Tournament bracket validation

/// Token that joins the two most recent brackets
pub const JOINER: &str = "+";

/// Check a postfix bracket description is complete and balanced.
///
/// Team labels push a bracket of size 1; each `+` pops two brackets of equal
/// size and pushes their union. The sequence is balanced when it reduces to a
/// single bracket without ever joining unequal sizes. Malformed input is
/// simply unbalanced.
pub fn tournament_balanced<S: AsRef<str>>(sequence: &[S]) -> bool {
    let mut sizes: Vec<usize> = Vec::with_capacity(sequence.len());
    for token in sequence {
        if token.as_ref() != JOINER {
            sizes.push(1);
            continue;
        }
        let (Some(right), Some(left)) = (sizes.pop(), sizes.pop()) else {
            return false;
        };
        if left != right {
            return false;
        }
        sizes.push(left + right);
    }
    sizes.len() == 1
}

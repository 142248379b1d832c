use std::path::Path;

pub const DEFAULT_QUANTITY: u32 = 1;

/// Quantity encoded as the trailing `_<digits>` of a file name
///
/// `panel_12.dxf` → 12, `panel_12_7.dxf` → 7 (only the last segment counts).
/// Anything else, including a zero or out-of-range suffix, resolves to
/// [`DEFAULT_QUANTITY`].
pub fn resolve_quantity(name: &str) -> u32 {
    let Some(stem) = Path::new(name).file_stem().and_then(|s| s.to_str()) else {
        return DEFAULT_QUANTITY;
    };
    let Some((_, suffix)) = stem.rsplit_once('_') else {
        return DEFAULT_QUANTITY;
    };
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return DEFAULT_QUANTITY;
    }

    match suffix.parse::<u32>() {
        Ok(0) => {
            log::warn!("Quantity 0 in {} ignored, using {}", name, DEFAULT_QUANTITY);
            DEFAULT_QUANTITY
        }
        Ok(quantity) => quantity,
        Err(_) => {
            log::warn!(
                "Quantity {} in {} is out of range, using {}",
                suffix,
                name,
                DEFAULT_QUANTITY
            );
            DEFAULT_QUANTITY
        }
    }
}

//! Phone number normalization
//!
//! Numbers typed by users or sent by the host come in any format. Before
//! comparing them against webphone sessions they are reduced to E.164 where
//! the region allows it, e.g. `(650) 555-0100` in `US` becomes `+16505550100`.
//! Extensions (`*101`) are kept and appended after normalization.

/// Numbers with at most this many digits are extensions or short codes
const MAX_SHORT_NUMBER_LEN: usize = 5;

/// Countries sharing the North American Numbering Plan
const NANP_COUNTRIES: &[&str] = &["US", "CA", "PR"];

/// International calling code for a region, if known
pub fn calling_code(country_code: &str) -> Option<&'static str> {
    let code = match country_code.to_ascii_uppercase().as_str() {
        "US" | "CA" | "PR" => "1",
        "GB" => "44",
        "FR" => "33",
        "DE" => "49",
        "AU" => "61",
        "NL" => "31",
        "AT" => "43",
        "CH" => "41",
        "IE" => "353",
        "ES" => "34",
        "IT" => "39",
        "MX" => "52",
        "BR" => "55",
        "IN" => "91",
        "CN" => "86",
        "JP" => "81",
        "NZ" => "64",
        "ZA" => "27",
        _ => return None,
    };
    Some(code)
}

/// Normalize `phone_number` for the given region.
pub fn normalize_number(phone_number: &str, country_code: &str, area_code: &str) -> String {
    let trimmed = phone_number.trim();
    let (main, extension) = match trimmed.split_once('*') {
        Some((main, ext)) => (main, Some(digits_of(ext))),
        None => (trimmed, None),
    };

    let mut normalized = normalize_main(main, country_code, area_code);
    if let Some(ext) = extension.filter(|e| !e.is_empty()) {
        normalized.push('*');
        normalized.push_str(&ext);
    }
    normalized
}

fn digits_of(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn normalize_main(main: &str, country_code: &str, area_code: &str) -> String {
    let digits = digits_of(main);
    if digits.is_empty() {
        return digits;
    }
    if main.starts_with('+') {
        return format!("+{}", digits);
    }
    if digits.len() <= MAX_SHORT_NUMBER_LEN {
        return digits;
    }
    if let Some(international) = digits.strip_prefix("00") {
        return format!("+{}", international);
    }

    let country = country_code.to_ascii_uppercase();
    if NANP_COUNTRIES.contains(&country.as_str()) {
        let area = digits_of(area_code);
        return match digits.len() {
            7 if area.len() == 3 => format!("+1{}{}", area, digits),
            10 => format!("+1{}", digits),
            11 if digits.starts_with('1') => format!("+{}", digits),
            _ => digits,
        };
    }

    match calling_code(&country) {
        Some(code) => {
            let national = digits.strip_prefix('0').unwrap_or(&digits);
            format!("+{}{}", code, national)
        }
        None => digits,
    }
}

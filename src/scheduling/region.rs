//! Display labels for timezone identifiers.

/// Country or region names for commonly used zones.
const REGION_LABELS: &[(&str, &str)] = &[
    ("Africa/Abidjan", "Côte d'Ivoire"),
    ("Africa/Accra", "Ghana"),
    ("Africa/Addis_Ababa", "Ethiopia"),
    ("Africa/Algiers", "Algeria"),
    ("Africa/Cairo", "Egypt"),
    ("Africa/Casablanca", "Morocco"),
    ("Africa/Dar_es_Salaam", "Tanzania"),
    ("Africa/Johannesburg", "South Africa"),
    ("Africa/Kampala", "Uganda"),
    ("Africa/Khartoum", "Sudan"),
    ("Africa/Kinshasa", "Congo - Kinshasa"),
    ("Africa/Lagos", "Nigeria"),
    ("Africa/Nairobi", "Kenya"),
    ("Africa/Tunis", "Tunisia"),
    ("America/Anchorage", "United States"),
    ("America/Argentina/Buenos_Aires", "Argentina"),
    ("America/Bogota", "Colombia"),
    ("America/Buenos_Aires", "Argentina"),
    ("America/Caracas", "Venezuela"),
    ("America/Chicago", "United States"),
    ("America/Denver", "United States"),
    ("America/Edmonton", "Canada"),
    ("America/Guatemala", "Guatemala"),
    ("America/Halifax", "Canada"),
    ("America/Havana", "Cuba"),
    ("America/Lima", "Peru"),
    ("America/Los_Angeles", "United States"),
    ("America/Mexico_City", "Mexico"),
    ("America/Montevideo", "Uruguay"),
    ("America/New_York", "United States"),
    ("America/Panama", "Panama"),
    ("America/Phoenix", "United States"),
    ("America/Puerto_Rico", "Puerto Rico"),
    ("America/Santiago", "Chile"),
    ("America/Sao_Paulo", "Brazil"),
    ("America/St_Johns", "Canada"),
    ("America/Toronto", "Canada"),
    ("America/Vancouver", "Canada"),
    ("America/Winnipeg", "Canada"),
    ("Asia/Almaty", "Kazakhstan"),
    ("Asia/Baghdad", "Iraq"),
    ("Asia/Bangkok", "Thailand"),
    ("Asia/Calcutta", "India"),
    ("Asia/Colombo", "Sri Lanka"),
    ("Asia/Dhaka", "Bangladesh"),
    ("Asia/Dubai", "United Arab Emirates"),
    ("Asia/Ho_Chi_Minh", "Vietnam"),
    ("Asia/Hong_Kong", "Hong Kong"),
    ("Asia/Jakarta", "Indonesia"),
    ("Asia/Jerusalem", "Israel"),
    ("Asia/Kabul", "Afghanistan"),
    ("Asia/Karachi", "Pakistan"),
    ("Asia/Kathmandu", "Nepal"),
    ("Asia/Kolkata", "India"),
    ("Asia/Kuala_Lumpur", "Malaysia"),
    ("Asia/Manila", "Philippines"),
    ("Asia/Qatar", "Qatar"),
    ("Asia/Riyadh", "Saudi Arabia"),
    ("Asia/Seoul", "South Korea"),
    ("Asia/Shanghai", "China"),
    ("Asia/Singapore", "Singapore"),
    ("Asia/Taipei", "Taiwan"),
    ("Asia/Tehran", "Iran"),
    ("Asia/Tokyo", "Japan"),
    ("Asia/Yangon", "Myanmar"),
    ("Atlantic/Reykjavik", "Iceland"),
    ("Australia/Adelaide", "Australia"),
    ("Australia/Brisbane", "Australia"),
    ("Australia/Melbourne", "Australia"),
    ("Australia/Perth", "Australia"),
    ("Australia/Sydney", "Australia"),
    ("Europe/Amsterdam", "Netherlands"),
    ("Europe/Athens", "Greece"),
    ("Europe/Berlin", "Germany"),
    ("Europe/Brussels", "Belgium"),
    ("Europe/Bucharest", "Romania"),
    ("Europe/Budapest", "Hungary"),
    ("Europe/Copenhagen", "Denmark"),
    ("Europe/Dublin", "Ireland"),
    ("Europe/Helsinki", "Finland"),
    ("Europe/Istanbul", "Türkiye"),
    ("Europe/Kiev", "Ukraine"),
    ("Europe/Kyiv", "Ukraine"),
    ("Europe/Lisbon", "Portugal"),
    ("Europe/London", "United Kingdom"),
    ("Europe/Madrid", "Spain"),
    ("Europe/Moscow", "Russia"),
    ("Europe/Oslo", "Norway"),
    ("Europe/Paris", "France"),
    ("Europe/Prague", "Czechia"),
    ("Europe/Rome", "Italy"),
    ("Europe/Stockholm", "Sweden"),
    ("Europe/Vienna", "Austria"),
    ("Europe/Warsaw", "Poland"),
    ("Europe/Zurich", "Switzerland"),
    ("Pacific/Auckland", "New Zealand"),
    ("Pacific/Honolulu", "United States"),
];

/// Returns the display label for a timezone identifier.
///
/// Zones without a known country fall back to their last path segment with
/// underscores turned into spaces, so `"America/Boise"` reads as `"Boise"`.
pub fn region_label(identifier: &str) -> String {
    REGION_LABELS
        .iter()
        .find(|(zone, _)| *zone == identifier)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| {
            identifier
                .rsplit('/')
                .next()
                .unwrap_or(identifier)
                .replace('_', " ")
        })
}

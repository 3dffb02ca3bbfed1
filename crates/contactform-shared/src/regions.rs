//! Region names offered by the form's state selector.
//!
//! The list is a client-side contract only. The submission service stores
//! whatever `state` text it receives and never checks it against this list.

/// The 28 states followed by the 8 union territories.
pub const STATES: [&str; 36] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Andaman and Nicobar Islands",
    "Chandigarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Lakshadweep",
    "Puducherry",
];

pub fn is_known_region(name: &str) -> bool {
    STATES.contains(&name)
}

/// Look up a region by its 1-based position in [`STATES`].
pub fn region_by_number(n: usize) -> Option<&'static str> {
    n.checked_sub(1).and_then(|i| STATES.get(i)).copied()
}

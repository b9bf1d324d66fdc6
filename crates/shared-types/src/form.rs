use serde::{Deserialize, Serialize};

use crate::business::Business;
use crate::location::{towns_for, LocationRecord};

// ── Option catalogues ───────────────────────────────────────────────

/// Category label written on every listing created through the form.
pub const LISTING_CATEGORY: &str = "Futsal Court Rental";

/// Selectable rentable-field counts.
pub const FIELD_COUNT_OPTIONS: &[u32] = &[1, 2, 3, 4, 5];

/// Payment methods a venue can accept for bookings.
pub const PAYMENT_METHODS: &[&str] = &["Cash on Arrival", "WeChat Pay", "KPay", "Paylah"];

/// Facilities and rules checkboxes.
pub const FACILITIES: &[&str] = &[
    "Changing Rooms /Locker Rooms",
    "Equipment Rental (Futsal shoes, ball rental)",
    "Shop / Kiosk (selling drinks, snacks, sports gear)",
    "Drinking Water",
    "First Aid Kit",
    "CCTV Security",
    "Toilets",
    "Car Parking",
    "Free Wi-Fi",
    "Floodlights (for night games)",
    "Seating Area / Bleachers",
    "Near Metro/Bus Stop",
];

/// Business option checkboxes.
pub const BUSINESS_OPTIONS: &[&str] = &[
    "Cash on Delivery",
    "Pickup In-Store",
    "Free Wifi",
    "Next-Day Delivery",
    "We Sell Online",
    "Online Payments",
];

// ── Enums ───────────────────────────────────────────────────────────

/// How the listing fee is paid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOption {
    /// Card processor checkout.
    Stripe,
    /// Bank or digital-wallet transfer, confirmed by an uploaded receipt.
    #[default]
    Bank,
}

impl PaymentOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentOption::Stripe => "stripe",
            PaymentOption::Bank => "bank",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "stripe" => PaymentOption::Stripe,
            _ => PaymentOption::Bank,
        }
    }
}

/// Whether the POS + website add-on is taken together with the listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OnlineShopOption {
    #[default]
    Sure,
    NotNow,
}

impl OnlineShopOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnlineShopOption::Sure => "sure",
            OnlineShopOption::NotNow => "not_now",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "not_now" => OnlineShopOption::NotNow,
            _ => OnlineShopOption::Sure,
        }
    }

    /// Integer stored in the `POS+Website` column.
    pub fn as_flag(&self) -> i32 {
        match self {
            OnlineShopOption::Sure => 1,
            OnlineShopOption::NotNow => 0,
        }
    }
}

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Lowercase key used in the serialized opening hours.
    pub fn key(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

// ── Opening hours ───────────────────────────────────────────────────

/// Opening and closing time (`HH:MM`) for one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayHours {
    pub open: String,
    pub close: String,
    pub closed: bool,
}

impl DayHours {
    fn business_day() -> Self {
        Self {
            open: "09:00".to_string(),
            close: "17:00".to_string(),
            closed: false,
        }
    }

    fn closed_day() -> Self {
        Self {
            closed: true,
            ..Self::business_day()
        }
    }
}

/// Weekly schedule. Serializes to an object keyed by lowercase weekday.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpeningHours {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl Default for OpeningHours {
    fn default() -> Self {
        Self {
            monday: DayHours::business_day(),
            tuesday: DayHours::business_day(),
            wednesday: DayHours::business_day(),
            thursday: DayHours::business_day(),
            friday: DayHours::business_day(),
            saturday: DayHours::business_day(),
            sunday: DayHours::closed_day(),
        }
    }
}

impl OpeningHours {
    pub fn day(&self, day: Weekday) -> &DayHours {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn day_mut(&mut self, day: Weekday) -> &mut DayHours {
        match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Every day that is open has both an opening and a closing time.
    pub fn is_complete(&self) -> bool {
        Weekday::ALL.iter().all(|&day| {
            let hours = self.day(day);
            hours.closed || (!hours.open.trim().is_empty() && !hours.close.trim().is_empty())
        })
    }
}

// ── Field details ───────────────────────────────────────────────────

/// Name and hourly price of one rentable field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FieldDetail {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
}

/// Which half of a field detail an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPart {
    Name,
    Price,
}

/// Free-text inputs addressable through [`FormState::set_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Description,
    Phone,
    Address,
    ZipCode,
    Website,
    InformationWebsite,
    FacebookPage,
    TiktokUrl,
    StartingPrice,
}

// ── Form state ──────────────────────────────────────────────────────

/// Every value held by the listing form.
///
/// Invariant-bearing fields (field count, field details, town selection) are
/// private and only change through the methods below, so the field-details
/// list always matches the count and the town always belongs to the
/// selected province.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub name: String,
    pub description: String,
    pub phone: String,
    pub address: String,
    pub zip_code: String,
    pub website: String,
    pub information_website: String,
    pub facebook_page: String,
    pub tiktok_url: String,
    pub starting_price: String,
    pub payment_option: PaymentOption,
    pub online_shop_option: OnlineShopOption,
    pub opening_hours: OpeningHours,
    province_district: String,
    towns: String,
    available_towns: Vec<String>,
    number_of_fields: u32,
    field_details: Vec<FieldDetail>,
    payment_methods: Vec<String>,
    facilities: Vec<String>,
    options: Vec<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            phone: String::new(),
            address: String::new(),
            zip_code: String::new(),
            website: String::new(),
            information_website: String::new(),
            facebook_page: String::new(),
            tiktok_url: String::new(),
            starting_price: String::new(),
            payment_option: PaymentOption::default(),
            online_shop_option: OnlineShopOption::default(),
            opening_hours: OpeningHours::default(),
            province_district: String::new(),
            towns: String::new(),
            available_towns: Vec::new(),
            number_of_fields: 1,
            field_details: vec![FieldDetail::default()],
            payment_methods: Vec::new(),
            facilities: Vec::new(),
            options: Vec::new(),
        }
    }
}

impl FormState {
    /// Initialise from an existing listing (edit mode).
    ///
    /// Unparseable stored opening hours fall back to the default schedule.
    /// Available towns stay empty until [`FormState::seed_towns`] runs with
    /// the loaded locations.
    pub fn from_business(b: &Business) -> Self {
        let field_details = b
            .field_details
            .clone()
            .and_then(|v| serde_json::from_value::<Vec<FieldDetail>>(v).ok())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| vec![FieldDetail::default()]);

        let opening_hours = b
            .opening_hours
            .as_deref()
            .and_then(|json| OpeningHours::from_json(json).ok())
            .unwrap_or_default();

        let mut state = Self {
            name: b.name.clone(),
            description: b.description.clone().unwrap_or_default(),
            phone: b.phone.clone().unwrap_or_default(),
            address: b.address.clone().unwrap_or_default(),
            zip_code: b.zip_code.clone().unwrap_or_default(),
            website: b.website.clone().unwrap_or_default(),
            information_website: b.information_website.clone().unwrap_or_default(),
            facebook_page: b.facebook_page.clone().unwrap_or_default(),
            tiktok_url: b.tiktok_url.clone().unwrap_or_default(),
            starting_price: b.starting_price.clone().unwrap_or_default(),
            payment_option: PaymentOption::default(),
            online_shop_option: OnlineShopOption::default(),
            opening_hours,
            province_district: b.province_district.clone().unwrap_or_default(),
            towns: b.towns.clone().unwrap_or_default(),
            available_towns: Vec::new(),
            number_of_fields: 1,
            field_details,
            payment_methods: b.payment_methods.clone().unwrap_or_default(),
            facilities: b.facilities.clone().unwrap_or_default(),
            options: b.business_options.clone().unwrap_or_default(),
        };
        state.set_number_of_fields(u32::try_from(b.number_of_fields).unwrap_or(1));
        state
    }

    // ── Text fields ──

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::Description => &self.description,
            TextField::Phone => &self.phone,
            TextField::Address => &self.address,
            TextField::ZipCode => &self.zip_code,
            TextField::Website => &self.website,
            TextField::InformationWebsite => &self.information_website,
            TextField::FacebookPage => &self.facebook_page,
            TextField::TiktokUrl => &self.tiktok_url,
            TextField::StartingPrice => &self.starting_price,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        let value = value.into();
        match field {
            TextField::Name => self.name = value,
            TextField::Description => self.description = value,
            TextField::Phone => self.phone = value,
            TextField::Address => self.address = value,
            TextField::ZipCode => self.zip_code = value,
            TextField::Website => self.website = value,
            TextField::InformationWebsite => self.information_website = value,
            TextField::FacebookPage => self.facebook_page = value,
            TextField::TiktokUrl => self.tiktok_url = value,
            TextField::StartingPrice => self.starting_price = value,
        }
    }

    // ── Field count and details ──

    pub fn number_of_fields(&self) -> u32 {
        self.number_of_fields
    }

    pub fn field_details(&self) -> &[FieldDetail] {
        &self.field_details
    }

    /// Set the field count and grow or truncate the details list to match.
    /// Entries at indices below the new count are kept as they were.
    pub fn set_number_of_fields(&mut self, count: u32) {
        let min = FIELD_COUNT_OPTIONS[0];
        let max = FIELD_COUNT_OPTIONS[FIELD_COUNT_OPTIONS.len() - 1];
        let count = count.clamp(min, max);
        self.number_of_fields = count;
        self.field_details
            .resize_with(count as usize, FieldDetail::default);
    }

    /// Textual variant used by the select input; unparseable input means 1.
    pub fn set_number_of_fields_str(&mut self, value: &str) {
        let count = value.trim().parse::<u32>().unwrap_or(1);
        self.set_number_of_fields(count);
    }

    pub fn set_field_detail(&mut self, index: usize, part: FieldPart, value: impl Into<String>) {
        if let Some(detail) = self.field_details.get_mut(index) {
            match part {
                FieldPart::Name => detail.name = value.into(),
                FieldPart::Price => detail.price = value.into(),
            }
        }
    }

    // ── Province and town ──

    pub fn province_district(&self) -> &str {
        &self.province_district
    }

    pub fn town(&self) -> &str {
        &self.towns
    }

    pub fn available_towns(&self) -> &[String] {
        &self.available_towns
    }

    /// Select a province: clears the town and replaces the town options with
    /// that province's towns from the loaded locations.
    pub fn select_province(&mut self, province: &str, locations: &[LocationRecord]) {
        self.province_district = province.to_string();
        self.towns.clear();
        self.available_towns = towns_for(locations, province).to_vec();
    }

    /// Populate town options for the already-selected province without
    /// touching the chosen town. Used once locations arrive in edit mode.
    pub fn seed_towns(&mut self, locations: &[LocationRecord]) {
        if self.province_district.is_empty() {
            return;
        }
        if let Some(loc) = locations
            .iter()
            .find(|l| l.province_district == self.province_district)
        {
            self.available_towns = loc.towns.clone();
        }
    }

    /// Choose a town. Values not offered for the current province are ignored.
    pub fn set_town(&mut self, town: &str) {
        if town.is_empty() || self.available_towns.iter().any(|t| t == town) {
            self.towns = town.to_string();
        }
    }

    // ── Checkbox groups ──

    pub fn payment_methods(&self) -> &[String] {
        &self.payment_methods
    }

    pub fn facilities(&self) -> &[String] {
        &self.facilities
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn toggle_payment_method(&mut self, method: &str, checked: bool) {
        toggle(&mut self.payment_methods, method, checked);
    }

    pub fn toggle_facility(&mut self, facility: &str, checked: bool) {
        toggle(&mut self.facilities, facility, checked);
    }

    pub fn toggle_option(&mut self, option: &str, checked: bool) {
        toggle(&mut self.options, option, checked);
    }

    // ── Opening hours ──

    pub fn set_open(&mut self, day: Weekday, time: impl Into<String>) {
        self.opening_hours.day_mut(day).open = time.into();
    }

    pub fn set_close(&mut self, day: Weekday, time: impl Into<String>) {
        self.opening_hours.day_mut(day).close = time.into();
    }

    pub fn set_closed(&mut self, day: Weekday, closed: bool) {
        self.opening_hours.day_mut(day).closed = closed;
    }

    pub fn opening_hours_json(&self) -> String {
        self.opening_hours.to_json()
    }

    /// Switch to card payment when receipts cannot be uploaded. Returns
    /// whether the option changed.
    pub fn disable_bank_transfer(&mut self) -> bool {
        if self.payment_option == PaymentOption::Bank {
            self.payment_option = PaymentOption::Stripe;
            true
        } else {
            false
        }
    }

    // ── Derived values ──

    /// Amount due for bank transfer: the listing price, plus the add-on
    /// price when the online-shop option is taken.
    pub fn total_price(&self, listing_display: &str, addon_display: &str) -> f64 {
        let listing = parse_price(listing_display);
        match self.online_shop_option {
            OnlineShopOption::Sure => listing + parse_price(addon_display),
            OnlineShopOption::NotNow => listing,
        }
    }

    /// Labels of required inputs that are still empty.
    pub fn missing_required(&self, receipt_selected: bool) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("Business Name");
        }
        debug_assert!(FIELD_COUNT_OPTIONS.contains(&self.number_of_fields));
        debug_assert_eq!(self.field_details.len(), self.number_of_fields as usize);
        if self.description.trim().is_empty() {
            missing.push("Description");
        }
        if self.phone.trim().is_empty() {
            missing.push("Phone");
        }
        if !self.opening_hours.is_complete() {
            missing.push("Opening Hours");
        }
        if self.payment_option == PaymentOption::Bank && !receipt_selected {
            missing.push("Receipt");
        }
        missing
    }
}

fn toggle(set: &mut Vec<String>, value: &str, checked: bool) {
    if checked {
        if !set.iter().any(|v| v == value) {
            set.push(value.to_string());
        }
    } else {
        set.retain(|v| v != value);
    }
}

/// Numeric value of a price display such as `"$10/mo"`.
///
/// Everything except digits and `.` is stripped, then the longest leading
/// decimal number is parsed. Nothing parseable yields `0.0`.
pub fn parse_price(display: &str) -> f64 {
    let cleaned: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in cleaned.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        end = i + c.len_utf8();
    }

    cleaned[..end].parse::<f64>().unwrap_or(0.0)
}

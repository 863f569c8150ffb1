//! Built-in request schemas
//!
//! One constructor per payload kind. Field names are the camelCase keys the
//! web client sends.

use super::schema::{CrossFieldRule, FieldRule, Location, Schema, SchemaName};
use super::validators::{
    HAS_DIGIT_REGEX, HAS_LETTER_REGEX, OBJECT_ID_REGEX, PHONE_REGEX, PINCODE_REGEX,
    TRACKING_NUMBER_REGEX, URL_REGEX,
};

// ─────────────────────────────────────────────────────────────────────────────
// Allowed values
// ─────────────────────────────────────────────────────────────────────────────

pub const USER_ROLES: &[&str] = &["farmer", "buyer", "expert", "admin"];

pub const PRODUCT_CATEGORIES: &[&str] = &[
    "vegetables",
    "fruits",
    "grains",
    "pulses",
    "spices",
    "dairy",
    "seeds",
    "fertilizers",
    "pesticides",
    "equipment",
    "other",
];

pub const PRODUCT_UNITS: &[&str] = &["kg", "quintal", "ton", "litre", "dozen", "piece", "packet", "bag"];

pub const PAYMENT_METHODS: &[&str] = &["cod", "upi", "card", "netbanking", "wallet"];

pub const ORDER_STATUSES: &[&str] = &[
    "pending",
    "confirmed",
    "processing",
    "shipped",
    "delivered",
    "cancelled",
    "returned",
];

pub const SCHEME_CATEGORIES: &[&str] = &[
    "subsidy",
    "loan",
    "insurance",
    "training",
    "equipment",
    "irrigation",
    "organic-farming",
    "market-support",
];

pub const NOTIFICATION_TYPES: &[&str] = &[
    "info",
    "order",
    "payment",
    "weather",
    "pest-alert",
    "scheme",
    "system",
];

pub const NOTIFICATION_PRIORITIES: &[&str] = &["low", "normal", "high", "urgent"];

pub const SORT_FIELDS: &[&str] = &["createdAt", "updatedAt", "price", "name", "rating"];

pub const SORT_ORDERS: &[&str] = &["asc", "desc"];

// ─────────────────────────────────────────────────────────────────────────────
// Limits
// ─────────────────────────────────────────────────────────────────────────────

const MAX_NAME_LENGTH: usize = 100;
const MAX_DESCRIPTION_LENGTH: usize = 2000;
const MAX_PRICE: f64 = 10_000_000.0;
const MAX_IMAGES: usize = 10;
const MAX_TAGS: usize = 10;
const MAX_ORDER_ITEMS: usize = 50;
const MIN_PASSWORD_LENGTH: usize = 8;
const MAX_PASSWORD_LENGTH: usize = 128;
const MAX_PAGE: f64 = 10_000.0;
const MAX_PAGE_SIZE: f64 = 100.0;
const MAX_CROP_SUGGESTIONS: f64 = 20.0;

pub fn all() -> Vec<Schema> {
    vec![
        register(),
        login(),
        product(),
        order(),
        order_status(),
        soil_report(),
        scheme(),
        notification(),
        disease_detection(),
        pagination(),
        crop_suggestion(),
        id_param(),
    ]
}

fn url(name: &'static str) -> FieldRule {
    FieldRule::string(name).max_len(500).pattern(
        &URL_REGEX,
        "must be a valid URL (starting with http:// or https://)",
    )
}

fn pincode(name: &'static str) -> FieldRule {
    FieldRule::string(name).pattern(&PINCODE_REGEX, "must be a valid 6-digit pincode")
}

fn phone(name: &'static str) -> FieldRule {
    FieldRule::string(name).pattern(&PHONE_REGEX, "must be a valid 10-digit mobile number")
}

fn object_id(name: &'static str) -> FieldRule {
    FieldRule::string(name).pattern(&OBJECT_ID_REGEX, "must be a valid id")
}

fn cancellation_reason() -> FieldRule {
    FieldRule::string("cancellationReason").min_len(5).max_len(500).clean_text()
}

fn cancellation_rule() -> CrossFieldRule {
    CrossFieldRule::RequiredWhen {
        field: "cancellationReason",
        when: "orderStatus",
        equals: "cancelled",
    }
}

fn register() -> Schema {
    Schema::new(SchemaName::Register, Location::Body)
        .field(FieldRule::string("name").required().min_len(2).max_len(50).clean_text().no_xss())
        .field(FieldRule::string("email").required().max_len(254).email())
        .field(
            FieldRule::string("password")
                .required()
                .raw()
                .min_len(MIN_PASSWORD_LENGTH)
                .max_len(MAX_PASSWORD_LENGTH)
                .pattern(&HAS_LETTER_REGEX, "must contain at least one letter")
                .pattern(&HAS_DIGIT_REGEX, "must contain at least one digit"),
        )
        .field(FieldRule::string("confirmPassword").required().raw())
        .field(phone("phone"))
        .field(FieldRule::string("role").one_of(USER_ROLES).default("farmer"))
        .field(FieldRule::object(
            "location",
            vec![
                FieldRule::string("village").max_len(MAX_NAME_LENGTH).clean_text(),
                FieldRule::string("district").max_len(MAX_NAME_LENGTH).clean_text(),
                FieldRule::string("state").max_len(MAX_NAME_LENGTH).clean_text(),
                pincode("pincode"),
            ],
        ))
        .field(FieldRule::number("farmSize").min(0.0).max(10_000.0))
        .cross(CrossFieldRule::Matches {
            field: "confirmPassword",
            other: "password",
        })
}

fn login() -> Schema {
    Schema::new(SchemaName::Login, Location::Body)
        .field(FieldRule::string("email").required().email())
        .field(FieldRule::string("password").required().raw())
        .field(FieldRule::boolean("rememberMe").default(false))
}

fn product() -> Schema {
    Schema::new(SchemaName::Product, Location::Body)
        .field(
            FieldRule::string("name")
                .required()
                .min_len(2)
                .max_len(MAX_NAME_LENGTH)
                .clean_text()
                .no_xss(),
        )
        .field(
            FieldRule::string("description")
                .max_len(MAX_DESCRIPTION_LENGTH)
                .clean_text()
                .no_xss(),
        )
        .field(FieldRule::string("category").required().one_of(PRODUCT_CATEGORIES))
        .field(FieldRule::number("price").required().min(0.01).max(MAX_PRICE))
        .field(FieldRule::string("unit").required().one_of(PRODUCT_UNITS))
        .field(FieldRule::number("quantity").required().min(0.0))
        .field(FieldRule::number("minimumOrder").min(1.0).default(1))
        .field(FieldRule::number("maximumOrder").min(1.0))
        .field(FieldRule::date("harvestDate"))
        .field(FieldRule::date("expiryDate"))
        .field(FieldRule::boolean("isOrganic").default(false))
        .field(FieldRule::array("images", url("image")).max_items(MAX_IMAGES))
        .field(
            FieldRule::array("tags", FieldRule::string("tag").max_len(30).clean_text().no_xss())
                .max_items(MAX_TAGS),
        )
        .field(FieldRule::object(
            "location",
            vec![
                FieldRule::string("district").max_len(MAX_NAME_LENGTH).clean_text(),
                FieldRule::string("state").max_len(MAX_NAME_LENGTH).clean_text(),
                pincode("pincode"),
            ],
        ))
        .cross(CrossFieldRule::GreaterOrEqual {
            field: "maximumOrder",
            other: "minimumOrder",
        })
        .cross(CrossFieldRule::After {
            field: "expiryDate",
            other: "harvestDate",
        })
}

fn order() -> Schema {
    Schema::new(SchemaName::Order, Location::Body)
        .field(
            FieldRule::array(
                "items",
                FieldRule::object(
                    "item",
                    vec![
                        object_id("product").required(),
                        FieldRule::number("quantity").required().min(1.0),
                        FieldRule::number("price").min(0.0),
                    ],
                ),
            )
            .required()
            .min_items(1)
            .max_items(MAX_ORDER_ITEMS),
        )
        .field(
            FieldRule::object(
                "shippingAddress",
                vec![
                    FieldRule::string("street").required().max_len(200).clean_text(),
                    FieldRule::string("city").required().max_len(MAX_NAME_LENGTH).clean_text(),
                    FieldRule::string("state").required().max_len(MAX_NAME_LENGTH).clean_text(),
                    pincode("pincode").required(),
                    phone("phone"),
                ],
            )
            .required(),
        )
        .field(FieldRule::string("paymentMethod").required().one_of(PAYMENT_METHODS))
        .field(FieldRule::string("orderStatus").one_of(ORDER_STATUSES).default("pending"))
        .field(cancellation_reason())
        .field(FieldRule::string("notes").max_len(500).clean_text().no_xss())
        .cross(cancellation_rule())
}

fn order_status() -> Schema {
    Schema::new(SchemaName::OrderStatus, Location::Body)
        .field(FieldRule::string("orderStatus").required().one_of(ORDER_STATUSES))
        .field(cancellation_reason())
        .field(FieldRule::string("trackingNumber").pattern(
            &TRACKING_NUMBER_REGEX,
            "must be 6-50 letters, digits or dashes",
        ))
        .cross(cancellation_rule())
}

fn soil_report() -> Schema {
    Schema::new(SchemaName::SoilReport, Location::Body)
        .field(FieldRule::string("farmName").max_len(MAX_NAME_LENGTH).clean_text())
        .field(FieldRule::string("location").max_len(200).clean_text())
        .field(FieldRule::number("pH").required().min(0.0).max(14.0))
        .field(FieldRule::number("nitrogen").required().min(0.0).max(2000.0))
        .field(FieldRule::number("phosphorus").required().min(0.0).max(500.0))
        .field(FieldRule::number("potassium").required().min(0.0).max(2000.0))
        .field(FieldRule::number("organicMatter").required().min(0.0).max(100.0))
        .field(FieldRule::number("moisture").min(0.0).max(100.0))
        .field(FieldRule::date("testDate"))
        .field(FieldRule::string("cropType").max_len(50).clean_text())
}

fn scheme() -> Schema {
    Schema::new(SchemaName::Scheme, Location::Body)
        .field(FieldRule::string("title").required().min_len(5).max_len(200).clean_text().no_xss())
        .field(
            FieldRule::string("description")
                .required()
                .min_len(20)
                .max_len(5000)
                .clean_text()
                .no_xss(),
        )
        .field(FieldRule::string("category").required().one_of(SCHEME_CATEGORIES))
        .field(
            FieldRule::array("eligibility", FieldRule::string("criterion").max_len(300).clean_text())
                .max_items(20),
        )
        .field(FieldRule::string("benefits").required().max_len(MAX_DESCRIPTION_LENGTH).clean_text())
        .field(FieldRule::string("state").max_len(MAX_NAME_LENGTH).default("All India"))
        .field(url("applicationUrl"))
        .field(FieldRule::date("startDate").required())
        .field(FieldRule::date("endDate"))
        .field(FieldRule::boolean("isActive").default(true))
        .cross(CrossFieldRule::After {
            field: "endDate",
            other: "startDate",
        })
}

fn notification() -> Schema {
    Schema::new(SchemaName::Notification, Location::Body)
        .field(object_id("recipient").required())
        .field(FieldRule::string("title").required().max_len(MAX_NAME_LENGTH).clean_text())
        .field(FieldRule::string("message").required().max_len(1000).clean_text().no_xss())
        .field(FieldRule::string("type").one_of(NOTIFICATION_TYPES).default("info"))
        .field(FieldRule::string("priority").one_of(NOTIFICATION_PRIORITIES).default("normal"))
        .field(url("link"))
}

fn disease_detection() -> Schema {
    Schema::new(SchemaName::DiseaseDetection, Location::Body)
        .field(FieldRule::string("cropType").max_len(50).clean_text())
        .field(url("imageUrl"))
        .field(FieldRule::string("location").max_len(200).clean_text())
}

fn pagination() -> Schema {
    Schema::new(SchemaName::Pagination, Location::Query)
        .field(FieldRule::integer("page").min(1.0).max(MAX_PAGE).default(1))
        .field(FieldRule::integer("limit").min(1.0).max(MAX_PAGE_SIZE).default(10))
        .field(FieldRule::string("sort").one_of(SORT_FIELDS).default("createdAt"))
        .field(FieldRule::string("order").one_of(SORT_ORDERS).default("desc"))
        .field(FieldRule::string("search").max_len(MAX_NAME_LENGTH).clean_text())
        .field(FieldRule::string("category").one_of(PRODUCT_CATEGORIES))
}

fn crop_suggestion() -> Schema {
    Schema::new(SchemaName::CropSuggestion, Location::Query)
        .field(FieldRule::number("pH").required().min(0.0).max(14.0))
        .field(FieldRule::number("nitrogen").required().min(0.0))
        .field(FieldRule::number("phosphorus").required().min(0.0))
        .field(FieldRule::number("potassium").required().min(0.0))
        .field(FieldRule::number("organicMatter").min(0.0).max(100.0).default(2))
        .field(FieldRule::integer("limit").min(1.0).max(MAX_CROP_SUGGESTIONS).default(5))
}

fn id_param() -> Schema {
    Schema::new(SchemaName::IdParam, Location::Params).field(object_id("id").required())
}

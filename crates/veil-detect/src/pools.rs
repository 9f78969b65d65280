//! Word pools for generated substitutes

pub static GIVEN_MALE: &[&str] = &[
    "Robert", "James", "Michael", "David", "Daniel", "Thomas", "Andrew", "Kevin", "Brian", "Steven",
    "Edward", "Gregory", "Samuel", "Nathan", "Victor", "Marcus", "Peter", "Raymond", "Henry", "Oliver",
    "Lucas", "Adrian", "Martin", "Felix", "Gabriel", "Howard", "Isaac", "Julian", "Leonard", "Miguel",
];

pub static GIVEN_FEMALE: &[&str] = &[
    "Linda", "Susan", "Karen", "Laura", "Rachel", "Emily", "Helen", "Diana", "Julia", "Monica",
    "Teresa", "Angela", "Sandra", "Carmen", "Naomi", "Irene", "Grace", "Vivian", "Claire", "Denise",
    "Evelyn", "Fiona", "Gloria", "Hannah", "Ingrid", "Joyce", "Leah", "Marian", "Nora", "Rosa",
];

pub static SURNAMES: &[&str] = &[
    "Chen", "Patel", "Nguyen", "Garcia", "Okafor", "Johansson", "Reyes", "Kowalski", "Brennan", "Haddad",
    "Lindqvist", "Moreau", "Castillo", "Fischer", "Tanaka", "Delgado", "Abernathy", "Whitfield", "Sorensen", "Mendez",
    "Callahan", "Novak", "Ramirez", "Ferreira", "Holloway", "Iverson", "Kim", "Larkin", "Marsh", "Pruitt",
    "Quinlan", "Rosales", "Sutherland", "Thornton", "Underwood", "Vasquez", "Whitaker", "Yamamoto", "Zeller", "Ashford",
    "Barlow", "Carver", "Dunmore", "Ellison", "Fairbanks", "Gallagher", "Hensley", "Jarvis", "Kessler", "Lombardi",
];

/// Distinctive words for organization and facility names
pub static PLACE_STEMS: &[&str] = &[
    "Harborview", "Summit", "Northfield", "Lakeshore", "Pinecrest", "Crescent", "Redwood", "Evergreen",
    "Brookside", "Silverline", "Ridgeway", "Oakmont", "Westbrook", "Fairhaven", "Stonebridge", "Clearwater",
    "Maplewood", "Riverbend", "Highland", "Bayside", "Cedar Grove", "Granite Peak", "Willow Creek", "Sunridge",
];

/// Generic descriptors kept as-is inside institution names
pub static DESCRIPTORS: &[&str] = &[
    "General", "Regional", "Memorial", "Community", "University", "County", "Children's", "Veterans",
    "Family", "Central", "Valley", "National", "Mutual", "Life", "Health", "Medical", "Care", "Services",
    "Specialty", "Surgical", "Behavioral", "Women's", "Insurance", "Assurance", "Law", "Legal",
    "Financial", "Benefits", "Hospital", "St.", "Saint", "of", "&", "and",
];

/// Words that never start or make up an institution's distinctive part
pub static INSTITUTION_STOPWORDS: &[&str] = &[
    "The", "This", "That", "Such", "Said", "Any", "Each", "Every", "All", "No", "Under", "By",
    "Between", "From", "With", "For", "And", "Or", "Its", "Their", "Our", "Your", "Her", "His",
    "A", "An", "If", "When", "Upon",
];

/// Month and weekday names; they end a name and only count as a later
/// reference outside a date
pub static CALENDAR_WORDS: &[&str] = &[
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday",
    "Saturday", "Sunday",
];

/// Capitalized words that are not part of a person's name
pub static NON_NAME_WORDS: &[&str] = &[
    "Information", "Form", "Forms", "Agreement", "Records", "Record", "Name", "Services", "Care",
    "Rights", "Portal", "Authorization", "Privacy", "Notice", "Consent", "Intake", "Chart", "File",
    "Account", "Policy", "Plan", "Hospital", "Clinic", "Center", "Medical", "Health", "Court",
    "County", "State", "Section", "Exhibit", "Schedule", "Article", "Party", "Parties", "Claim",
    "Claims", "Statement", "Summary", "Report", "History", "Number", "Date", "Signature", "Counsel",
];

pub static STREET_NAMES: &[&str] = &[
    "Maple", "Oak", "Cedar", "Elm", "Willow", "Birch", "Spruce", "Chestnut", "Juniper", "Magnolia",
    "Hawthorne", "Sycamore", "Laurel", "Aspen", "Linden", "Poplar", "Sequoia", "Hickory", "Alder", "Cypress",
    "Meadow", "Orchard", "Harbor", "Ridge", "Lakeview", "Fairview", "Hillcrest", "Park", "Summit", "Garden",
];

/// City with its state
pub static CITIES: &[(&str, &str)] = &[
    ("Riverton", "WY"),
    ("Fairmont", "WV"),
    ("Greenville", "SC"),
    ("Ashland", "OR"),
    ("Bristol", "TN"),
    ("Clayton", "MO"),
    ("Dover", "DE"),
    ("Franklin", "TN"),
    ("Georgetown", "KY"),
    ("Hudson", "OH"),
    ("Kingston", "NY"),
    ("Lancaster", "PA"),
    ("Madison", "WI"),
    ("Milford", "CT"),
    ("Newport", "RI"),
    ("Oxford", "MS"),
    ("Salem", "OR"),
    ("Troy", "MI"),
    ("Lake Forest", "IL"),
    ("Cedar Falls", "IA"),
];

/// Lowercase labels for generated email domains
pub static DOMAIN_WORDS: &[&str] = &[
    "harborviewhealth", "summitlaw", "northfieldmed", "lakeshorecare", "pinecrestgroup", "redwoodclinic",
    "evergreenpartners", "brooksidehealth", "ridgewaylegal", "oakmontmedical", "westbrookins", "fairhavenhs",
];

/// Shared mailbox names that identify nobody
pub static ROLE_MAILBOXES: &[&str] = &[
    "info", "admin", "billing", "records", "contact", "support", "office", "claims", "intake",
    "noreply", "no-reply", "reception", "appointments", "legal", "hr", "help",
];

/// Middle initials
pub static INITIALS: &[&str] = &[
    "A.", "B.", "C.", "D.", "E.", "F.", "G.", "H.", "J.", "K.", "L.", "M.", "N.", "P.", "R.", "S.",
    "T.", "V.", "W.",
];

/// Mail providers whose domains are not identifying
pub static PUBLIC_MAIL_DOMAINS: &[&str] = &[
    "gmail", "yahoo", "outlook", "hotmail", "aol", "icloud", "protonmail", "live", "msn",
];

pub fn contains_ignore_case(pool: &[&str], word: &str) -> bool {
    pool.iter().any(|w| w.eq_ignore_ascii_case(word))
}

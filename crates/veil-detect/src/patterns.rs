//! Compiled detection patterns
//!
//! Name-like patterns only use literal spaces between words so that a
//! detection never spans a line break.

use lazy_static::lazy_static;
use regex::Regex;

use crate::formulary;

/// A single capitalized name word: Williams, O'Neil, McAllister, Smith-Jones
pub const NAME_WORD: &str = r"(?:Ma?c[A-Z][a-z]+|[A-Z]'[A-Z][a-z]+|[A-Z][a-z]+(?:-[A-Z][a-z]+)?)";

pub const HONORIFIC: &str = r"(?:Dr|Mr|Mrs|Ms|Miss|Prof)\.?";

pub const PROFESSIONAL_SUFFIX: &str = r"(?:M\.D\.|MD|D\.O\.|DO|R\.N\.|RN|N\.P\.|NP|Esq\.|Jr\.|Sr\.|III|II)";

/// Capitalized word, or a short abbreviation such as "St."
pub const INSTITUTION_WORD: &str = r"(?:[A-Z][a-z]{0,2}\.|[A-Z][A-Za-z']*)";

pub const ORG_SUFFIX: &str = r"(?:(?:LLP|LLC|Incorporated|Corporation|Company|Group|Associates|Partners|Insurance|Assurance|Mutual|Health Plan|Pharmaceuticals|Laboratories)\b|(?:Inc|Corp|Co|Ltd)\b\.?)";

pub const FACILITY_SUFFIX: &str = r"(?:Hospital|Medical Center|Medical Group|Health Center|Health System|Surgery Center|Rehabilitation Center|Nursing Home|Hospice|Urgent Care|Clinic|Pharmacy)\b";

pub const STREET_SUFFIX: &str = r"(?:Street|St|Avenue|Ave|Road|Rd|Boulevard|Blvd|Drive|Dr|Lane|Ln|Way|Court|Ct|Place|Pl|Parkway|Pkwy|Terrace|Circle|Highway|Hwy)";

lazy_static! {
    /// Dr. Patricia Williams, Mr. J. Lee, Ms. Anne-Marie O'Neil, M.D.
    pub static ref TITLED_NAME: Regex = Regex::new(&format!(
        r"\b{h} +{w}(?: +(?:[A-Z]\.|{w})){{0,2}}(?:, +{s})?",
        h = HONORIFIC,
        w = NAME_WORD,
        s = PROFESSIONAL_SUFFIX,
    ))
    .unwrap();

    /// Patient Jane Doe, Plaintiff: John A. Smith
    pub static ref ROLE_NAME: Regex = Regex::new(&format!(
        r"\b(?:[Pp]atient|[Pp]laintiff|[Dd]efendant|[Cc]laimant|[Bb]eneficiary|[Gg]uardian|[Ww]itness|[Pp]olicyholder|[Dd]ecedent|[Pp]etitioner|[Rr]espondent)(?: [Nn]ame)?[,:]? +(?P<name>{w}(?: +(?:[A-Z]\.|{w})){{1,2}})",
        w = NAME_WORD,
    ))
    .unwrap();

    pub static ref ORGANIZATION: Regex = Regex::new(&format!(
        r"\b{w}(?: +(?:{w}|&)){{0,4}} +{s}",
        w = INSTITUTION_WORD,
        s = ORG_SUFFIX,
    ))
    .unwrap();

    pub static ref FACILITY: Regex = Regex::new(&format!(
        r"\b{w}(?: +{w}){{0,3}} +{s}",
        w = INSTITUTION_WORD,
        s = FACILITY_SUFFIX,
    ))
    .unwrap();

    pub static ref ORG_SUFFIX_AT_END: Regex =
        Regex::new(&format!(r" +(?P<suffix>{})$", ORG_SUFFIX)).unwrap();

    pub static ref FACILITY_SUFFIX_AT_END: Regex =
        Regex::new(&format!(r" +(?P<suffix>{})$", FACILITY_SUFFIX)).unwrap();

    /// 1420 Maple Avenue, Suite 3, Springfield, IL 62704
    pub static ref ADDRESS: Regex = Regex::new(&format!(
        r"\b(?P<number>\d{{1,6}}) +(?P<dir>[NSEW]\.? +)?(?P<street>(?:(?:[A-Z][a-z]+|\d+(?:st|nd|rd|th)) +){{1,3}})(?P<suffix>{suf}\b\.?)(?P<unit>,? +(?:Suite|Ste\.?|Apt\.?|Apartment|Unit|#) *[A-Za-z0-9-]+)?(?P<locality>, +(?P<city>[A-Z][a-z]+(?: [A-Z][a-z]+)*), +(?P<state>[A-Z]{{2}}) +(?P<zip>\d{{5}}(?:-\d{{4}})?))?",
        suf = STREET_SUFFIX,
    ))
    .unwrap();

    pub static ref PHONE: Regex =
        Regex::new(r"(?:\+?1[ .-]?)?(?:\(\d{3}\) ?|\b\d{3}[ .-])\d{3}[ .-]\d{4}\b").unwrap();

    pub static ref EMAIL: Regex =
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}\b").unwrap();

    pub static ref ACCOUNT: Regex = Regex::new(
        r"(?i:\b(?:account|acct|policy|member|subscriber|claim|group|invoice)(?: +(?:no\.?|number|num\.?|id))?)\.? *[#:]? *(?P<id>[A-Z0-9]+(?:-[A-Z0-9]+)*)\b"
    )
    .unwrap();

    pub static ref IDENTIFIER: Regex = Regex::new(
        r"(?i:\b(?:MRN|medical record(?: +(?:number|no\.?))?|SSN|social security(?: +(?:number|no\.?))?|NPI|DEA(?: +(?:number|no\.?))?|license(?: +(?:number|no\.?))?|patient id|case(?: +(?:number|no\.?)))) *[#:]? *(?P<id>[A-Z0-9]+(?:-[A-Z0-9]+)*)\b"
    )
    .unwrap();

    pub static ref SSN: Regex = Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").unwrap();

    pub static ref DOSAGE: Regex = Regex::new(
        r"\b(?P<value>\d{1,3}(?:,\d{3})+|\d+(?:\.\d+)?)(?P<sep> ?)(?P<unit>(?i:mcg|mg|µg|g|mL|ml|units?|IU|mEq))(?P<per>/(?:kg|day|dose|mL|hr|h))?\b"
    )
    .unwrap();

    /// $150/month, $ 12,500.00, USD 1.2 million per year
    pub static ref MONEY: Regex = Regex::new(
        r"(?:\$(?P<sep> ?)|\bUSD ?)(?P<value>\d{1,3}(?:,\d{3})+(?:\.\d{1,2})?|\d+(?:\.\d{1,2})?)(?P<magnitude> (?:thousand|million|billion))?(?P<rate>/(?:month|mo|year|yr|week|wk|day|hour|hr|visit|dose)| per (?:month|year|week|day|hour|visit|dose))?\b"
    )
    .unwrap();

    /// 150 dollars, 2 million dollars a year
    pub static ref DOLLARS: Regex = Regex::new(
        r"\b(?P<value>\d{1,3}(?:,\d{3})+(?:\.\d{1,2})?|\d+(?:\.\d{1,2})?)(?: (?:thousand|million|billion))? dollars\b(?: (?:a|per) (?:month|year|week|day|hour|visit|dose)\b)?"
    )
    .unwrap();

    /// First plain number in a text: 2, 1,000, 0.5
    pub static ref NUMBER: Regex =
        Regex::new(r"(?P<value>\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?)").unwrap();

    pub static ref MEDICATION: Regex = Regex::new(&format!(
        r"(?i)\b(?:{})\b",
        formulary::all_names()
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|")
    ))
    .unwrap();

    /// Shapes that are dates and must never be treated as identifiers
    /// Text that continues a month or weekday into a date: " 5", ", 2024", ", January"
    pub static ref DATE_AFTER: Regex = Regex::new(
        r"^,? +(?:\d{1,2}(?:st|nd|rd|th)?\b|(?:19|20)\d{2}\b|(?:January|February|March|April|May|June|July|August|September|October|November|December)\b)"
    )
    .unwrap();

    /// Text that introduces a month or weekday: "due in ", "until next "
    pub static ref DATE_BEFORE: Regex = Regex::new(
        r"(?i)\b(?:on|in|by|until|till|since|before|after|during|from|through|next|last|this|every|each|early|late|mid)[ -]+$"
    )
    .unwrap();

    pub static ref DATE_LIKE: Regex =
        Regex::new(r"^(?:\d{4}-\d{1,2}-\d{1,2}|\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|(?:19|20)\d{2})$").unwrap();
}

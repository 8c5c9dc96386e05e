// Rule-based pattern detectors — pure in-process matching, no I/O.
//
// These are the first detectors in the pipeline and the only ones that
// run for every input type. Tables are static configuration baked into
// the binary; they are read-only at runtime.

use std::sync::OnceLock;

use regex_lite::Regex;

use crate::scoring::Signal;

use super::url_features::extract_domain;

// ── URL analysis ────────────────────────────────────────────────

const SKETCHY_TLDS: &[&str] = &[
    ".xyz", ".top", ".buzz", ".click", ".loan", ".work", ".gq", ".tk", ".ml", ".cf", ".ga",
    ".icu",
];

const URL_SHORTENERS: &[&str] = &[
    "bit.ly", "tinyurl", "t.co", "goo.gl", "ow.ly", "is.gd", "buff.ly", "rebrand.ly",
    "shorte.st",
];

/// Brand keywords mapped to the domains that legitimately carry them.
/// A URL containing the keyword but resolving anywhere else is treated
/// as a lookalike.
const BRAND_DOMAINS: &[(&str, &[&str])] = &[
    ("paypal", &["paypal.com"]),
    ("amazon", &["amazon.com", "amazon.ca", "amazon.co.uk", "amazonaws.com"]),
    ("apple", &["apple.com", "icloud.com"]),
    ("microsoft", &["microsoft.com", "live.com", "outlook.com", "office.com", "xbox.com"]),
    ("netflix", &["netflix.com"]),
    ("google", &["google.com", "google.ca", "google.co.uk", "gmail.com", "youtube.com"]),
    ("chase", &["chase.com"]),
    ("wellsfargo", &["wellsfargo.com"]),
    ("td", &["td.com", "tdbank.com", "tdcanadatrust.com"]),
    ("rbc", &["rbc.com", "rbcroyalbank.com", "rbcinsurance.com", "rbcdirectinvesting.com"]),
    ("cibc", &["cibc.com"]),
    ("scotiabank", &["scotiabank.com"]),
    ("bmo", &["bmo.com", "bmoinvestorline.com", "bmoharris.com"]),
    ("desjardins", &["desjardins.com", "disnat.com"]),
    ("interac", &["interac.ca"]),
    ("costco", &["costco.com", "costco.ca"]),
    ("walmart", &["walmart.com", "walmart.ca"]),
    ("bestbuy", &["bestbuy.com", "bestbuy.ca"]),
    ("canadapost", &["canadapost.ca", "canadapost-postescanada.ca"]),
    ("ups", &["ups.com"]),
    ("fedex", &["fedex.com"]),
    ("usps", &["usps.com"]),
    ("irs", &["irs.gov"]),
    ("meta", &["meta.com", "facebook.com", "instagram.com", "whatsapp.com"]),
    ("tiktok", &["tiktok.com"]),
    ("shopify", &["shopify.com", "myshopify.com"]),
];

/// Analyze a URL or bare domain for structural scam patterns.
pub fn analyze_url(input: &str) -> Vec<Signal> {
    let mut signals = Vec::new();
    let lower = input.to_lowercase();
    let lower = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .unwrap_or(&lower);
    let lower = lower.strip_prefix("www.").unwrap_or(lower);
    let domain = extract_domain(input);

    if SKETCHY_TLDS.iter().any(|tld| domain.ends_with(tld)) {
        signals.push(Signal::new(
            "This website uses a domain ending that is very commonly seen in scam sites.",
            20.0,
        ));
    }

    for &(brand, legit) in BRAND_DOMAINS {
        if lower.contains(brand) {
            let is_legit = legit
                .iter()
                .any(|d| domain == *d || domain.ends_with(&format!(".{d}")));
            if !is_legit {
                signals.push(Signal::new(
                    format!(
                        "The website address contains \"{brand}\" but is not the official \
                         {brand} website. This is a common trick."
                    ),
                    30.0,
                ));
            }
            break;
        }
    }

    if domain.matches('-').count() >= 3 {
        signals.push(Signal::new(
            "The website address has many hyphens, which is unusual for legitimate sites.",
            15.0,
        ));
    }
    if domain.chars().filter(|c| c.is_ascii_digit()).count() >= 4 {
        signals.push(Signal::new(
            "The website address contains many numbers, which is common with throwaway scam sites.",
            10.0,
        ));
    }

    if ip_prefix_re().is_match(&domain) {
        signals.push(Signal::new(
            "This goes to a raw IP address instead of a proper website name. Legitimate \
             businesses almost never do this.",
            25.0,
        ));
    }

    if input.len() > 100 {
        signals.push(Signal::new(
            "This is an unusually long web address, which is sometimes used to hide the real \
             destination.",
            10.0,
        ));
    }

    if URL_SHORTENERS.iter().any(|s| lower.starts_with(s)) {
        signals.push(Signal::new(
            "This is a shortened link, which hides the real website. Scammers often use these \
             to disguise dangerous links.",
            15.0,
        ));
    }

    signals
}

// ── Message analysis ────────────────────────────────────────────

const URGENCY_PHRASES: &[&str] = &[
    "act now", "immediate action", "urgent", "expires today", "last chance", "limited time",
    "don't delay", "right away", "asap", "within 24 hours", "account suspended",
    "account locked", "verify immediately", "immediately", "arrested", "warrant",
    "legal action", "prosecuted", "suspended", "terminated", "frozen", "seized", "penalty",
    "you will be", "failure to", "if you do not", "within the next",
];

const THREAT_PHRASES: &[&str] = &[
    "arrested", "warrant", "jail", "prison", "prosecuted", "legal action", "law enforcement",
    "police will",
];

const MONEY_PHRASES: &[&str] = &[
    "send money", "wire transfer", "gift card", "bitcoin", "crypto", "western union",
    "moneygram", "e-transfer", "etransfer", "interac", "pay a fee", "processing fee",
    "shipping fee", "customs fee", "pay with", "send payment", "cash app", "zelle", "venmo",
];

const INFO_REQUEST_PHRASES: &[&str] = &[
    "social security", "sin number", "social insurance", "password", "credit card",
    "bank account", "date of birth", "mother's maiden", "verify your identity",
    "confirm your details", "update your information",
];

const PRIZE_PHRASES: &[&str] = &[
    "you've won", "you have won", "congratulations", "winner", "lottery", "inheritance",
    "unclaimed funds", "million dollars", "claim your prize", "selected as a winner",
];

const IMPERSONATION_PHRASES: &[&str] = &[
    "cra", "irs", "canada revenue", "revenue agency", "amazon support", "microsoft support",
    "apple support", "your account has been", "we noticed suspicious", "from your bank",
];

const JOB_SCAM_PHRASES: &[&str] = &[
    "no experience required", "no experience needed", "full training included",
    "full training provided", "work from home", "work remotely", "flexible remote",
    "remote opportunity", "own schedule", "same-day payouts", "same day payout",
    "same-day pay", "earn $", "make $", "/day", "per day", "top earners",
    "top performers make", "onboarding new", "hiring immediately", "start today",
    "start this week", "place ads", "post ads", "review products", "rate products",
    "message us on whatsapp", "contact us on whatsapp", "text us on whatsapp", "dm us on",
    "message us on telegram", "we found your profile", "we found your resume",
    "your profile caught", "we came across your", "you were selected",
];

const DELIVERY_PHRASES: &[&str] = &[
    "package is being held", "parcel is pending", "delivery delayed", "unable to deliver",
    "redelivery fee", "update your delivery address", "missed delivery attempt",
    "customs fee", "clearance fee", "canada post", "purolator", "package held at warehouse",
];

const TOLL_PHRASES: &[&str] = &[
    "unpaid toll", "toll balance", "toll penalty", "407 etr", "ezpass", "e-zpass", "sunpass",
    "fastrak", "toll road notice", "outstanding toll", "overdue toll",
];

const GRAMMAR_PHRASES: &[&str] = &[
    "dear customer", "dear user", "dear friend", "kindly", "do the needful", "revert back",
];

/// Analyze free-text message content for scam tactics. Embedded URLs get
/// the URL analysis applied to them as well (first two only).
pub fn analyze_message(input: &str) -> Vec<Signal> {
    let mut signals = Vec::new();
    let lower = input.to_lowercase();

    let contains_any = |phrases: &[&str]| phrases.iter().any(|p| lower.contains(p));
    let count_hits = |phrases: &[&str]| phrases.iter().filter(|p| lower.contains(*p)).count();

    if contains_any(URGENCY_PHRASES) {
        signals.push(Signal::new(
            "The message uses urgent or threatening language to pressure you into acting \
             quickly. This is a very common scam tactic.",
            30.0,
        ));
    }

    if contains_any(THREAT_PHRASES) {
        signals.push(Signal::new(
            "The message threatens you with arrest or legal action. Real government agencies \
             do not threaten people this way over the phone or by text.",
            35.0,
        ));
    }

    if contains_any(MONEY_PHRASES) {
        signals.push(Signal::new(
            "The message asks for money or mentions specific payment methods. Legitimate \
             organizations rarely ask for payment through gift cards, crypto, or wire \
             transfers.",
            30.0,
        ));
    }

    if contains_any(INFO_REQUEST_PHRASES) {
        signals.push(Signal::new(
            "The message asks for sensitive personal information. Real companies will not ask \
             for passwords, full card numbers, or SIN/SSN over text or email.",
            30.0,
        ));
    }

    if contains_any(PRIZE_PHRASES) {
        signals.push(Signal::new(
            "The message claims you've won something or have unclaimed money. This is one of \
             the oldest and most common scam types.",
            25.0,
        ));
    }

    if contains_any(IMPERSONATION_PHRASES) {
        signals.push(Signal::new(
            "The message appears to impersonate a government agency or major company. \
             Scammers often pretend to be the CRA, IRS, Amazon, or your bank.",
            20.0,
        ));
    }

    let job_hits = count_hits(JOB_SCAM_PHRASES);
    if job_hits >= 3 {
        signals.push(Signal::new(
            "This message has multiple signs of a fake job scam: vague role, unrealistic pay, \
             urgency to start, and contact through messaging apps instead of company email. \
             Legitimate employers don't recruit this way.",
            40.0,
        ));
    } else if job_hits == 2 {
        signals.push(Signal::new(
            "This message shows signs of a job scam. Be cautious of vague job offers with \
             high pay and no experience needed — especially if they ask you to contact them \
             on WhatsApp or Telegram.",
            25.0,
        ));
    }

    if (lower.contains("whatsapp") || lower.contains("telegram") || lower.contains("signal"))
        && intl_phone_re().is_match(input)
    {
        signals.push(Signal::new(
            "The message asks you to contact someone on WhatsApp/Telegram with a phone \
             number. Legitimate businesses use company email and official channels.",
            15.0,
        ));
    }

    if let Some(amount) = extract_earnings_claim(&lower) {
        if amount >= 200 {
            signals.push(Signal::new(
                format!(
                    "Claims of earning ${amount}+ per day with no experience are a hallmark of \
                     job scams and money mule recruitment."
                ),
                20.0,
            ));
        }
    }

    let delivery_hits = count_hits(DELIVERY_PHRASES);
    if delivery_hits >= 2 {
        signals.push(Signal::new(
            "This looks like a fake delivery notification. Real carriers like Canada Post \
             don't send texts demanding fees — they leave physical notices.",
            30.0,
        ));
    } else if delivery_hits == 1 {
        signals.push(Signal::new(
            "This message mentions a package or delivery. If you weren't expecting anything, \
             be suspicious — fake delivery texts are one of the most common scams.",
            15.0,
        ));
    }

    if contains_any(TOLL_PHRASES) {
        signals.push(Signal::new(
            "This message claims you have unpaid tolls. Real toll agencies send bills by \
             mail, not SMS payment demands.",
            30.0,
        ));
    }

    if qr_code_re().is_match(&lower) {
        signals.push(Signal::new(
            "The message asks you to scan a QR code. 'Quishing' (QR phishing) is a \
             fast-growing scam where QR codes lead to fake login pages or malware downloads.",
            25.0,
        ));
    }

    if contains_any(GRAMMAR_PHRASES) {
        signals.push(Signal::new(
            "The message uses generic greetings or unusual phrasing. Real companies usually \
             address you by name.",
            10.0,
        ));
    }

    let urls = extract_urls(input);
    if !urls.is_empty() {
        signals.push(Signal::new(
            "The message contains links. Be cautious about clicking any links in unexpected \
             messages.",
            10.0,
        ));
        for url in urls.iter().take(2) {
            signals.extend(analyze_url(url));
        }
    }

    signals
}

/// Pull plausible URLs out of message text.
pub fn extract_urls(input: &str) -> Vec<String> {
    url_re()
        .find_iter(input)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ')', ';']).to_string())
        .collect()
}

// ── Romance scam analysis ───────────────────────────────────────

const ROMANCE_CONTEXT_KEYWORDS: &[&str] = &[
    "dating", "tinder", "bumble", "hinge", "match.com", "plenty of fish", "pof", "boyfriend",
    "girlfriend", "partner", "met online", "love", "never met", "video call", "send money",
    "gift card", "oil rig", "military", "deployed", "overseas",
];

struct RomancePattern {
    phrases: &'static [&'static str],
    signal: &'static str,
    weight: f64,
}

const ROMANCE_PATTERNS: &[RomancePattern] = &[
    RomancePattern {
        phrases: &["i love you", "my love", "my darling", "my sweetheart", "soulmate", "destiny"],
        signal: "The messages contain very strong romantic language, which can be genuine but \
                 is also a hallmark of romance scam scripts.",
        weight: 15.0,
    },
    RomancePattern {
        phrases: &[
            "send money", "wire", "gift card", "bitcoin", "crypto", "invest",
            "trading platform", "pay for", "hospital bill", "customs fee", "release fee",
        ],
        signal: "There are requests for money, investment, or payment. This is the number one \
                 sign of a romance scam.",
        weight: 35.0,
    },
    RomancePattern {
        phrases: &[
            "can't video call", "camera broken", "bad connection", "in the military",
            "on an oil rig", "overseas", "deployed",
        ],
        signal: "There are excuses for not doing video calls or meeting in person. Romance \
                 scammers always have reasons to avoid being seen.",
        weight: 25.0,
    },
    RomancePattern {
        phrases: &[
            "move to whatsapp", "move to telegram", "text me on", "message me on",
            "let's talk on",
        ],
        signal: "They asked to move the conversation off the dating platform. Scammers do \
                 this to avoid the platform's fraud detection.",
        weight: 20.0,
    },
    RomancePattern {
        phrases: &[
            "emergency", "accident", "hospital", "stranded", "need help urgently",
            "please help me",
        ],
        signal: "They've described an urgent crisis requiring money. Romance scammers create \
                 fake emergencies to pressure victims.",
        weight: 25.0,
    },
];

/// True when the text reads like it came out of an online-dating context.
/// Requires two independent keywords so a lone "love" doesn't trigger it.
pub fn detect_romance_context(input: &str) -> bool {
    let lower = input.to_lowercase();
    ROMANCE_CONTEXT_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .count()
        >= 2
}

/// Romance-specific signals, run in addition to message analysis when
/// `detect_romance_context` fires.
pub fn analyze_romance(input: &str) -> Vec<Signal> {
    let lower = input.to_lowercase();
    ROMANCE_PATTERNS
        .iter()
        .filter(|p| p.phrases.iter().any(|ph| lower.contains(ph)))
        .map(|p| Signal::new(p.signal, p.weight))
        .collect()
}

// ── Phone / email / crypto / username analysis ──────────────────

/// Area and country codes that show up disproportionately in reported
/// phone scams (one-ring callbacks, premium Caribbean codes).
const SCAM_PHONE_PREFIXES: &[&str] = &[
    "233", "234", "242", "246", "284", "345", "441", "473", "649", "664", "767", "809", "829",
    "849", "868", "876", "900",
];

pub fn analyze_phone(input: &str) -> Vec<Signal> {
    let mut signals = Vec::new();
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 7 {
        return signals;
    }

    if toll_free_re().is_match(&digits) {
        signals.push(Signal::new(
            "This is a toll-free number. While many legitimate businesses use these, scammers \
             also set them up easily. Verify the number on the company's official website.",
            10.0,
        ));
    }

    if SCAM_PHONE_PREFIXES
        .iter()
        .any(|p| digits.starts_with(p) || digits.strip_prefix('1').is_some_and(|d| d.starts_with(p)))
    {
        signals.push(Signal::new(
            "This number's area code or country code is frequently associated with phone \
             scams. Be very cautious about calling back or answering.",
            25.0,
        ));
    }

    if digits.starts_with("1900") || digits.starts_with("900") {
        signals.push(Signal::new(
            "This is a premium-rate number that charges you per minute. Scammers trick people \
             into calling these numbers.",
            30.0,
        ));
    }

    signals
}

const FREE_EMAIL_PROVIDERS: &[&str] = &[
    "gmail.com", "yahoo.com", "hotmail.com", "outlook.com", "aol.com", "mail.com",
    "protonmail.com",
];

const EMAIL_BRANDS: &[&str] = &[
    "paypal", "amazon", "apple", "microsoft", "netflix", "chase", "td", "rbc",
];

pub fn analyze_email(input: &str) -> Vec<Signal> {
    let mut signals = Vec::new();
    let lower = input.to_lowercase();
    let Some(domain) = lower.trim().split('@').nth(1) else {
        return signals;
    };

    if FREE_EMAIL_PROVIDERS.iter().any(|p| domain == *p) {
        signals.push(Signal::new(
            "This email uses a free provider. Real companies and government agencies almost \
             always use their own email domain (e.g., @td.com, not @gmail.com).",
            15.0,
        ));
    }

    for brand in EMAIL_BRANDS {
        if domain.contains(brand) && !domain.starts_with(&format!("{brand}.")) {
            signals.push(Signal::new(
                format!(
                    "The email domain contains \"{brand}\" but is not the real {brand} email. \
                     This is a common impersonation trick."
                ),
                25.0,
            ));
            break;
        }
    }

    signals
}

pub fn analyze_crypto(input: &str) -> Vec<Signal> {
    let trimmed = input.trim();
    if !looks_like_wallet(trimmed) {
        return Vec::new();
    }
    vec![
        Signal::new(
            "This appears to be a cryptocurrency wallet address. If someone asked you to send \
             crypto to this address, be very cautious — crypto payments are nearly impossible \
             to reverse.",
            20.0,
        ),
        Signal::new(
            "Legitimate companies, government agencies, and banks will never ask you to pay \
             in cryptocurrency.",
            15.0,
        ),
    ]
}

/// Shape check for BTC, ETH, and XRP address formats.
pub fn looks_like_wallet(input: &str) -> bool {
    btc_re().is_match(input) || eth_re().is_match(input) || xrp_re().is_match(input)
}

pub fn analyze_username(input: &str) -> Vec<Signal> {
    if !input.trim().starts_with('@') {
        return Vec::new();
    }
    vec![Signal::new(
        "Be cautious of accounts that are very new, have few followers, or contacted you out \
         of the blue.",
        10.0,
    )]
}

/// Heuristic dispatch for the `other` input type: sniff what the user
/// actually pasted and run the matching analyzers.
pub fn analyze_other(input: &str) -> Vec<Signal> {
    let mut signals = Vec::new();
    let trimmed = input.trim();
    let digits = trimmed.chars().filter(|c| c.is_ascii_digit()).count();

    if digits >= 7 && trimmed.chars().all(|c| c.is_ascii_digit() || "+-() .".contains(c)) {
        signals.extend(analyze_phone(trimmed));
    }
    if trimmed.contains('@') && !trimmed.starts_with('@') {
        signals.extend(analyze_email(trimmed));
    }
    signals.extend(analyze_crypto(trimmed));
    signals.extend(analyze_username(trimmed));
    signals
}

// ── Compiled regexes (built once, read-only afterwards) ─────────

fn ip_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}").unwrap())
}

fn intl_phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\+\d{10,}").unwrap())
}

fn qr_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"scan (this |the )?qr code|qr code.*(payment|verify|login|access)").unwrap()
    })
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+|www\.\S+").unwrap())
}

fn toll_free_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^1?(800|888|877|866|855|844|833)").unwrap())
}

fn earnings_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$(\d+)(?:[–\-\s]*\$?(\d+))?").unwrap())
}

fn btc_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(1|3|bc1)[A-Za-z0-9]{25,62}$").unwrap())
}

fn eth_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^0x[a-fA-F0-9]{40}$").unwrap())
}

fn xrp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^r[A-Za-z0-9]{24,34}$").unwrap())
}

/// Parse "$X-$Y per day/hour/week" style earnings claims, returning the
/// highest claimed amount when the text also mentions a rate period.
fn extract_earnings_claim(lower: &str) -> Option<u32> {
    let mentions_rate = ["per day", "a day", "/day", "per hour", "/hr", "per week", "a week"]
        .iter()
        .any(|r| lower.contains(r));
    if !mentions_rate {
        return None;
    }
    let caps = earnings_re().captures(lower)?;
    let high = caps
        .get(2)
        .or_else(|| caps.get(1))?
        .as_str()
        .parse()
        .ok()?;
    Some(high)
}

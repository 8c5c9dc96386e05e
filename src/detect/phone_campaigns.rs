// Known scam call campaigns.
//
// A static catalog of active, named phone scam campaigns with the number
// shapes they are reported from. Matching is on the normalized number
// (digits only, 11-digit North American form). A high-risk campaign
// match is strong evidence on its own; medium-risk matches are noted
// more gently because the number shapes overlap with legitimate traffic.

use std::sync::OnceLock;

use regex_lite::Regex;

use crate::scoring::Signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignRisk {
    Medium,
    High,
}

pub struct Campaign {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub risk: CampaignRisk,
    /// Regexes over the normalized 11-digit number.
    number_shapes: &'static [&'static str],
    pub tactics: &'static [&'static str],
}

const TOLL_FREE: &str = r"^1?8(00|33|44|55|66|77|88)\d{7}$";
const ANY_NANP: &str = r"^\d{10,11}$";

static CAMPAIGNS: &[Campaign] = &[
    Campaign {
        id: "cra-tax",
        name: "CRA Tax Scam",
        description: "Callers impersonate the Canada Revenue Agency, threatening arrest or \
                      demanding immediate payment via gift cards or crypto.",
        risk: CampaignRisk::High,
        number_shapes: &[TOLL_FREE, r"^1?(226|343|289|416|905|613|647)\d{7}$"],
        tactics: &["Arrest threats", "Gift card payment", "SIN suspension"],
    },
    Campaign {
        id: "irs-impersonation",
        name: "IRS Impersonation Scam",
        description: "Callers claim to be IRS agents demanding immediate tax payment or \
                      threatening arrest and deportation.",
        risk: CampaignRisk::High,
        number_shapes: &[TOLL_FREE],
        tactics: &["Arrest threats", "Wire transfer demands", "SSN suspension"],
    },
    Campaign {
        id: "tech-support",
        name: "Tech Support Scam",
        description: "Pop-ups or calls claiming your computer has a virus, asking for remote \
                      access and payment to \"fix\" it.",
        risk: CampaignRisk::High,
        number_shapes: &[TOLL_FREE],
        tactics: &["Remote access", "Fake virus alerts", "Gift card payment"],
    },
    Campaign {
        id: "bank-fraud-dept",
        name: "Bank Fraud Department Impersonation",
        description: "Callers pretend to be your bank's fraud department, convincing you to \
                      transfer money to a \"safe\" account.",
        risk: CampaignRisk::High,
        number_shapes: &[r"^1?(416|905|604|514|403|613|647|289|226|343)\d{7}$", TOLL_FREE],
        tactics: &["Caller ID spoofing", "Urgency", "Transfer to a \"safe\" account"],
    },
    Campaign {
        id: "grandparent",
        name: "Grandparent Emergency Scam",
        description: "Caller pretends to be a grandchild in trouble — arrested, in an \
                      accident, or stranded — and begs for money urgently.",
        risk: CampaignRisk::High,
        number_shapes: &[ANY_NANP],
        tactics: &["Emotional manipulation", "Secrecy requests", "Wire transfer or gift cards"],
    },
    Campaign {
        id: "sin-ssn-suspension",
        name: "SIN / SSN Suspension Scam",
        description: "Automated calls claiming your Social Insurance Number or Social \
                      Security Number has been suspended due to suspicious activity.",
        risk: CampaignRisk::High,
        number_shapes: &[TOLL_FREE],
        tactics: &["Government impersonation", "Identity theft threats", "Immediate action demands"],
    },
    Campaign {
        id: "lottery-prize",
        name: "Lottery / Prize Winner Scam",
        description: "Calls announcing you won a lottery or prize, requiring a fee or taxes \
                      to claim winnings.",
        risk: CampaignRisk::High,
        number_shapes: &[TOLL_FREE, r"^1?(876|809|284)\d{7}$"],
        tactics: &["Advance fee", "Tax payment demands", "Gift cards"],
    },
    Campaign {
        id: "auto-warranty",
        name: "Extended Auto Warranty Robocall",
        description: "Automated calls about expiring vehicle warranties, pressing to buy fake \
                      extended coverage.",
        risk: CampaignRisk::Medium,
        number_shapes: &[ANY_NANP],
        tactics: &["Robocall", "High-pressure sales", "Fake urgency"],
    },
    Campaign {
        id: "utility-disconnect",
        name: "Utility Disconnection Scam",
        description: "Callers threaten immediate power, gas, or internet disconnection unless \
                      payment is made right away.",
        risk: CampaignRisk::High,
        number_shapes: &[ANY_NANP],
        tactics: &["Disconnection threats", "Immediate payment", "Gift cards"],
    },
    Campaign {
        id: "can-you-hear-me",
        name: "\"Can You Hear Me?\" Voice Recording Scam",
        description: "Caller asks \"Can you hear me?\" to record your \"yes\" response, \
                      potentially for voice authorization fraud.",
        risk: CampaignRisk::Medium,
        number_shapes: &[ANY_NANP],
        tactics: &["Voice capture", "Social engineering", "Authorization fraud"],
    },
];

fn compiled_shapes() -> &'static Vec<Vec<Regex>> {
    static SHAPES: OnceLock<Vec<Vec<Regex>>> = OnceLock::new();
    SHAPES.get_or_init(|| {
        CAMPAIGNS
            .iter()
            .map(|c| {
                c.number_shapes
                    .iter()
                    .map(|s| Regex::new(s).expect("static campaign regex"))
                    .collect()
            })
            .collect()
    })
}

/// Normalize to the 11-digit North American form where possible.
pub fn normalize_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 {
        format!("1{digits}")
    } else {
        digits
    }
}

/// Campaigns whose number shapes match this phone number.
pub fn matching_campaigns(phone: &str) -> Vec<&'static Campaign> {
    campaigns_matching(phone, true)
}

/// Campaigns matched through a shape more specific than "any valid
/// number". These are the only ones worth scoring on; the generic
/// shapes exist so the catalog can still be shown for any number.
pub fn specifically_matching_campaigns(phone: &str) -> Vec<&'static Campaign> {
    campaigns_matching(phone, false)
}

fn campaigns_matching(phone: &str, include_generic: bool) -> Vec<&'static Campaign> {
    let normalized = normalize_phone(phone);
    if normalized.is_empty() {
        return Vec::new();
    }
    CAMPAIGNS
        .iter()
        .zip(compiled_shapes())
        .filter(|(c, shapes)| {
            c.number_shapes
                .iter()
                .zip(shapes.iter())
                .any(|(pattern, re)| {
                    (include_generic || *pattern != ANY_NANP) && re.is_match(&normalized)
                })
        })
        .map(|(c, _)| c)
        .collect()
}

/// Campaign matches expressed as Signals. Only the single strongest
/// specifically-matched campaign is surfaced; the broad catch-all
/// shapes would otherwise tag every valid number.
pub fn check(phone: &str) -> Vec<Signal> {
    let matches = specifically_matching_campaigns(phone);
    let Some(best) = matches
        .iter()
        .find(|c| c.risk == CampaignRisk::High)
        .or_else(|| matches.first())
    else {
        return Vec::new();
    };

    let weight = match best.risk {
        CampaignRisk::High => 20.0,
        CampaignRisk::Medium => 10.0,
    };
    vec![Signal::new(
        format!(
            "This number matches the shape used by the \"{}\" campaign: {} Known tactics: {}.",
            best.name,
            best.description,
            best.tactics.join(", ")
        ),
        weight,
    )]
}

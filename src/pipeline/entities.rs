// Entity extraction — figures out which graph identifiers a scan touches.
//
// The primary input maps straight onto an entity type; URLs embedded in
// message text contribute their domains. Duplicates (same type and value)
// are dropped, first occurrence wins.

use std::collections::HashSet;

use crate::detect::{patterns, phone_campaigns, url_features};
use crate::graph::{EntityRef, EntityType};

use super::InputType;

pub fn extract_entities(input_type: InputType, input: &str) -> Vec<EntityRef> {
    let trimmed = input.trim();
    let mut entities = Vec::new();

    match input_type {
        InputType::Website => {
            entities.push(EntityRef::new(EntityType::Url, trimmed));
            let domain = url_features::extract_domain(trimmed);
            if !domain.is_empty() {
                entities.push(EntityRef::new(EntityType::Domain, domain));
            }
        }
        InputType::Message => {
            for url in patterns::extract_urls(trimmed) {
                let domain = url_features::extract_domain(&url);
                if !domain.is_empty() {
                    entities.push(EntityRef::new(EntityType::Domain, domain));
                }
            }
        }
        InputType::Phone => {
            entities.push(EntityRef::new(
                EntityType::Phone,
                phone_campaigns::normalize_phone(trimmed),
            ));
        }
        InputType::Email => {
            entities.push(EntityRef::new(EntityType::Email, trimmed));
            if let Some(domain) = trimmed.split('@').nth(1) {
                if !domain.is_empty() {
                    entities.push(EntityRef::new(EntityType::Domain, domain));
                }
            }
        }
        InputType::Crypto => {
            entities.push(EntityRef::new(EntityType::CryptoWallet, trimmed));
        }
        InputType::Other => {
            // Mirror the sniffing in patterns::analyze_other
            let digits = trimmed.chars().filter(|c| c.is_ascii_digit()).count();
            if patterns::looks_like_wallet(trimmed) {
                entities.push(EntityRef::new(EntityType::CryptoWallet, trimmed));
            } else if trimmed.contains('@') && !trimmed.starts_with('@') {
                entities.push(EntityRef::new(EntityType::Email, trimmed));
            } else if trimmed.starts_with('@') {
                entities.push(EntityRef::new(
                    EntityType::Username,
                    trimmed.trim_start_matches('@'),
                ));
            } else if digits >= 7
                && trimmed
                    .chars()
                    .all(|c| c.is_ascii_digit() || "+-() .".contains(c))
            {
                entities.push(EntityRef::new(
                    EntityType::Phone,
                    phone_campaigns::normalize_phone(trimmed),
                ));
            } else if trimmed.contains('.') && !trimmed.contains(char::is_whitespace) {
                let domain = url_features::extract_domain(trimmed);
                if !domain.is_empty() {
                    entities.push(EntityRef::new(EntityType::Domain, domain));
                }
            }
        }
    }

    dedup_entities(entities)
}

fn dedup_entities(entities: Vec<EntityRef>) -> Vec<EntityRef> {
    let mut seen = HashSet::new();
    entities
        .into_iter()
        .filter(|e| seen.insert((e.entity_type, e.value.to_lowercase())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn website_yields_url_and_domain() {
        let entities = extract_entities(InputType::Website, "https://promo.example/win");
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].entity_type, EntityType::Url);
        assert_eq!(entities[1].entity_type, EntityType::Domain);
        assert_eq!(entities[1].value, "promo.example");
    }

    #[test]
    fn message_yields_embedded_domains_deduped() {
        let text = "Click https://claim-now.example/a and also https://claim-now.example/b today";
        let entities = extract_entities(InputType::Message, text);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].entity_type, EntityType::Domain);
        assert_eq!(entities[0].value, "claim-now.example");
    }

    #[test]
    fn message_without_urls_yields_nothing() {
        let entities = extract_entities(InputType::Message, "hello, how are you");
        assert!(entities.is_empty());
    }

    #[test]
    fn phone_is_normalized() {
        let entities = extract_entities(InputType::Phone, "(800) 555-1234");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].value, "18005551234");
    }

    #[test]
    fn email_yields_address_and_domain() {
        let entities = extract_entities(InputType::Email, "support@secure-paypal.example");
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[1].value, "secure-paypal.example");
    }

    #[test]
    fn other_sniffs_wallet_shape() {
        let entities = extract_entities(
            InputType::Other,
            "0x52908400098527886E0F7030069857D2E4169EE7",
        );
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].entity_type, EntityType::CryptoWallet);
    }

    #[test]
    fn other_sniffs_username() {
        let entities = extract_entities(InputType::Other, "@crypto_king_99");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].entity_type, EntityType::Username);
        assert_eq!(entities[0].value, "crypto_king_99");
    }
}

//! Company, product and place names drawn through `fake`.
//!
//! Every function takes the caller's RNG so seeded generators stay
//! reproducible.

use fake::faker::address::en::{CityName, CountryName};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{DomainSuffix, Username};
use fake::faker::lorem::en::Word;
use fake::Fake;
use rand::Rng;

pub fn company<R: Rng>(rng: &mut R) -> String {
    CompanyName().fake_with_rng(rng)
}

/// A contact address on a company-looking domain, e.g. `jdoe@kuhn.com`.
pub fn company_email<R: Rng>(rng: &mut R) -> String {
    let user: String = Username().fake_with_rng(rng);
    let company: String = CompanyName().fake_with_rng(rng);
    let suffix: String = DomainSuffix().fake_with_rng(rng);
    format!(
        "{}@{}.{}",
        user.to_lowercase(),
        domain_label(&company),
        suffix
    )
}

/// Two lorem words, the first capitalized, e.g. `Dolorem quia`.
pub fn product_name<R: Rng>(rng: &mut R) -> String {
    let first: String = Word().fake_with_rng(rng);
    let second: String = Word().fake_with_rng(rng);
    format!("{} {}", capitalize(&first), second)
}

pub fn city<R: Rng>(rng: &mut R) -> String {
    CityName().fake_with_rng(rng)
}

pub fn country<R: Rng>(rng: &mut R) -> String {
    CountryName().fake_with_rng(rng)
}

/// Lowercased alphanumerics of the first word of a company name.
fn domain_label(company: &str) -> String {
    let label: String = company
        .split(|c: char| c.is_whitespace() || c == '-' || c == ',')
        .find(|word| word.chars().any(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();
    if label.is_empty() {
        "company".to_string()
    } else {
        label.to_lowercase()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_company_email_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let email = company_email(&mut rng);
            let (local, domain) = email.split_once('@').unwrap();
            assert!(!local.is_empty());
            assert!(!domain.contains('@'));
            let (label, suffix) = domain.split_once('.').unwrap();
            assert!(label.chars().all(|c| c.is_ascii_alphanumeric()));
            assert!(!suffix.is_empty());
            assert_eq!(email, email.to_lowercase());
        }
    }

    #[test]
    fn test_product_name_is_capitalized() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let name = product_name(&mut rng);
            let first = name.chars().next().unwrap();
            assert!(first.is_uppercase());
            assert_eq!(name.split(' ').count(), 2);
        }
    }

    #[test]
    fn test_same_seed_same_names() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(company(&mut a), company(&mut b));
        assert_eq!(city(&mut a), city(&mut b));
        assert_eq!(country(&mut a), country(&mut b));
    }

    #[test]
    fn test_domain_label() {
        assert_eq!(domain_label("O'Kon and Sons"), "okon");
        assert_eq!(domain_label("Schmidt-Hahn"), "schmidt");
        assert_eq!(domain_label("--"), "company");
    }
}

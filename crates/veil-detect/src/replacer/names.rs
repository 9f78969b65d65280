//! Person, institution and email substitutes

use tracing::warn;

use super::{Draw, Session, TokenMap, match_case};
use crate::name::{Gender, NameParts, is_initial};
use crate::patterns::{FACILITY_SUFFIX_AT_END, ORG_SUFFIX_AT_END};
use crate::pools::{
    DESCRIPTORS, DOMAIN_WORDS, GIVEN_FEMALE, GIVEN_MALE, INITIALS, INSTITUTION_STOPWORDS,
    PLACE_STEMS, PUBLIC_MAIL_DOMAINS, ROLE_MAILBOXES, SURNAMES, contains_ignore_case,
};

impl Session {
    /// Same honorific, suffix and token shape; tokens go through the shared maps.
    ///
    /// A retry varies the first given name or initial so the surname keeps
    /// agreeing with every other reference to the same person. Only a bare
    /// surname has to leave its map, which is logged.
    pub(super) fn person(&mut self, text: &str, draw: &mut Draw, attempt: u32) -> Option<String> {
        let parts = NameParts::parse(text);
        let (last, rest) = parts.words.split_last()?;
        let gender = parts.gender();
        let mut fresh = attempt > 0;

        let mut words = Vec::with_capacity(parts.words.len());
        for word in rest {
            let (salt, pool) = if is_initial(word) {
                ("initial", INITIALS)
            } else {
                let pool = match gender {
                    Gender::Male => GIVEN_MALE,
                    Gender::Female => GIVEN_FEMALE,
                    Gender::Unknown => self.given_pool(word),
                };
                ("given", pool)
            };
            let replacement = if fresh {
                fresh = false;
                draw.pick(pool).to_string()
            } else {
                let map = if salt == "initial" {
                    &mut self.tokens.initials
                } else {
                    &mut self.tokens.given
                };
                map.assign(self.seed, salt, word, pool, &self.avoid)
            };
            words.push(match_case(word, &replacement));
        }

        let surname = if fresh {
            warn!(attempt, "surname substitute collided, drawing one outside the shared map");
            draw.pick(SURNAMES).to_string()
        } else {
            self.tokens
                .surname
                .assign(self.seed, "surname", last, SURNAMES, &self.avoid)
        };
        words.push(match_case(last, &surname));

        if let Some(given) = rest.iter().find(|w| !is_initial(w)) {
            let pair = (given.to_lowercase(), last.to_lowercase());
            if !self.tokens.people.contains(&pair) {
                self.tokens.people.push(pair);
            }
        }

        Some(NameParts::assemble(parts.honorific, &words, parts.suffix))
    }

    /// Same legal form or facility type; distinctive words replaced
    pub(super) fn institution(
        &mut self,
        text: &str,
        draw: &mut Draw,
        attempt: u32,
        facility: bool,
    ) -> Option<String> {
        let suffix_pattern = if facility {
            &*FACILITY_SUFFIX_AT_END
        } else {
            &*ORG_SUFFIX_AT_END
        };
        let split = suffix_pattern.find(text).map_or(text.len(), |m| m.start());
        let (stem, suffix) = text.split_at(split);

        let words: Vec<&str> = stem.split_whitespace().collect();
        let partnership = words
            .iter()
            .any(|w| *w == "&" || w.eq_ignore_ascii_case("and"));

        let mut out = Vec::with_capacity(words.len() + 1);
        let mut fresh = attempt > 0;
        let mut changed = false;

        for (i, word) in words.iter().enumerate() {
            let after_saint = i > 0 && matches!(words[i - 1], "St." | "Saint");
            if !after_saint
                && (contains_ignore_case(DESCRIPTORS, word)
                    || contains_ignore_case(INSTITUTION_STOPWORDS, word))
            {
                out.push(word.to_string());
                continue;
            }

            let (bare, possessive) = match word.strip_suffix("'s") {
                Some(bare) if !bare.is_empty() => (bare, "'s"),
                _ => (*word, ""),
            };

            let (salt, pool) = if after_saint {
                ("given", self.given_pool(bare))
            } else if partnership {
                ("surname", SURNAMES)
            } else {
                ("stem", PLACE_STEMS)
            };

            let replacement = if fresh {
                fresh = false;
                draw.pick(pool).to_string()
            } else {
                let map: &mut TokenMap = match salt {
                    "given" => &mut self.tokens.given,
                    "surname" => &mut self.tokens.surname,
                    _ => &mut self.tokens.stem,
                };
                map.assign(self.seed, salt, bare, pool, &self.avoid)
            };

            out.push(format!("{}{}", match_case(bare, &replacement), possessive));
            changed = true;
        }

        if !changed {
            out.insert(0, draw.pick(PLACE_STEMS).to_string());
        }

        Some(format!("{}{}", out.join(" "), suffix))
    }

    /// Local part rebuilt from mapped name tokens; private domains relabelled
    pub(super) fn email(&mut self, text: &str, draw: &mut Draw, attempt: u32) -> Option<String> {
        let (local, domain) = text.rsplit_once('@')?;

        let mut local = if contains_ignore_case(ROLE_MAILBOXES, local) {
            local.to_string()
        } else {
            self.email_local(local, draw)
        };
        if attempt > 0 {
            local.push(draw.digit());
        }

        Some(format!("{}@{}", local, self.email_domain(domain)))
    }

    fn email_local(&self, local: &str, draw: &mut Draw) -> String {
        let segments = split_segments(local);
        let surname = segments
            .iter()
            .find(|s| self.tokens.surname.get(s).is_some())
            .map(|s| s.to_lowercase());

        let mut out = String::with_capacity(local.len());
        for segment in &segments {
            if !segment.chars().any(char::is_alphanumeric) {
                out.push_str(segment);
                continue;
            }

            let mapped = self
                .tokens
                .surname
                .get(segment)
                .or_else(|| self.tokens.given.get(segment))
                .map(str::to_string)
                .or_else(|| self.initial_for(segment, surname.as_deref()))
                .or_else(|| self.initial_and_surname(segment));

            match mapped {
                Some(mapped) => out.push_str(&match_case(segment, &mapped)),
                None => out.extend(segment.chars().map(|c| scramble_char(draw, c))),
            }
        }
        out
    }

    /// "p" in "p.williams": initial of the mapped given name of a known person
    fn initial_for(&self, segment: &str, surname: Option<&str>) -> Option<String> {
        let mut chars = segment.chars();
        let letter = chars.next()?.to_ascii_lowercase();
        if chars.next().is_some() || !letter.is_ascii_alphabetic() {
            return None;
        }

        let given = self
            .tokens
            .people
            .iter()
            .filter(|(_, s)| surname.is_none_or(|surname| surname == s.as_str()))
            .find(|(g, _)| g.starts_with(letter))
            .map(|(g, _)| g)?;

        self.tokens
            .given
            .get(given)
            .and_then(|mapped| mapped.chars().next())
            .map(|c| c.to_string())
    }

    /// "pwilliams": initial plus surname of a known person
    fn initial_and_surname(&self, segment: &str) -> Option<String> {
        let lower = segment.to_lowercase();
        self.tokens.people.iter().find_map(|(given, surname)| {
            let first = given.chars().next()?;
            if lower != format!("{}{}", first, surname) {
                return None;
            }
            let initial = self.tokens.given.get(given)?.chars().next()?;
            let mapped = self.tokens.surname.get(surname)?;
            Some(format!("{}{}", initial, mapped))
        })
    }

    fn email_domain(&mut self, domain: &str) -> String {
        let mut labels: Vec<String> = domain.split('.').map(str::to_string).collect();
        if labels.len() < 2 {
            return domain.to_string();
        }

        let i = labels.len() - 2;
        if contains_ignore_case(PUBLIC_MAIL_DOMAINS, &labels[i]) {
            return domain.to_string();
        }

        let replacement = self
            .tokens
            .domain
            .assign(self.seed, "domain", &labels[i], DOMAIN_WORDS, &self.avoid);
        labels[i] = match_case(&labels[i], &replacement);
        labels.join(".")
    }
}

/// Split an email local part into alphanumeric runs and separator runs
fn split_segments(local: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut alnum = None;

    for (i, c) in local.char_indices() {
        let is_alnum = c.is_alphanumeric();
        if alnum.is_some_and(|prev| prev != is_alnum) {
            segments.push(&local[start..i]);
            start = i;
        }
        alnum = Some(is_alnum);
    }
    if start < local.len() {
        segments.push(&local[start..]);
    }
    segments
}

fn scramble_char(draw: &mut Draw, c: char) -> char {
    if c.is_ascii_digit() {
        draw.digit()
    } else if c.is_ascii_alphabetic() {
        draw.letter(c.is_ascii_uppercase())
    } else {
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veil_core::{Category, Entity};

    fn session(texts: &[(Category, &str)]) -> Session {
        let entities: Vec<Entity> = texts
            .iter()
            .map(|(category, text)| Entity::new(*category, *text, 0))
            .collect();
        Session::new(11, &entities)
    }

    #[test]
    fn test_person_keeps_shape() {
        let mut s = session(&[(Category::PersonName, "Dr. Patricia J. Williams, M.D.")]);
        let mut draw = Draw::new(11, &["t"], 0);
        let out = s
            .person("Dr. Patricia J. Williams, M.D.", &mut draw, 0)
            .unwrap();
        let parts = NameParts::parse(&out);
        assert_eq!(parts.honorific, Some("Dr."));
        assert_eq!(parts.suffix, Some("M.D."));
        assert_eq!(parts.words.len(), 3);
        assert!(is_initial(parts.words[1]));
        assert_ne!(parts.words[1], "J.");
        assert!(SURNAMES.contains(&parts.words[2]));
    }

    #[test]
    fn test_person_gender_follows_honorific() {
        let mut s = session(&[(Category::PersonName, "Mrs. Jane Doe")]);
        let mut draw = Draw::new(11, &["t"], 0);
        let out = s.person("Mrs. Jane Doe", &mut draw, 0).unwrap();
        let given = NameParts::parse(&out).words[0].to_string();
        assert!(GIVEN_FEMALE.contains(&given.as_str()));
    }

    #[test]
    fn test_person_upper_case() {
        let mut s = session(&[(Category::PersonName, "JOHN SMITH")]);
        let mut draw = Draw::new(11, &["t"], 0);
        let out = s.person("JOHN SMITH", &mut draw, 0).unwrap();
        assert_eq!(out, out.to_uppercase());
        assert_ne!(out, "JOHN SMITH");
    }

    #[test]
    fn test_person_retry_keeps_mapped_surname() {
        let mut s = session(&[
            (Category::PersonName, "Dr. Patricia Williams"),
            (Category::PersonName, "Williams"),
        ]);
        let mut draw = Draw::new(11, &["t"], 0);
        let first = s.person("Dr. Patricia Williams", &mut draw, 0).unwrap();
        let bare = s.person("Williams", &mut draw, 0).unwrap();

        for attempt in 1..6 {
            let mut draw = Draw::new(11, &["t"], attempt);
            let retried = s.person("Dr. Patricia Williams", &mut draw, attempt).unwrap();
            let parts = NameParts::parse(&retried);
            assert_eq!(parts.honorific, Some("Dr."));
            assert_eq!(parts.words.len(), 2);
            assert_eq!(parts.words[1], bare, "{} vs {}", retried, first);
            assert!(GIVEN_FEMALE.contains(&parts.words[0]) || GIVEN_MALE.contains(&parts.words[0]));
        }
    }

    #[test]
    fn test_institution_keeps_suffix_and_descriptors() {
        let mut s = session(&[(Category::HealthcareFacility, "Springfield General Hospital")]);
        let mut draw = Draw::new(11, &["t"], 0);
        let out = s
            .institution("Springfield General Hospital", &mut draw, 0, true)
            .unwrap();
        assert!(out.ends_with(" General Hospital"), "{}", out);
        assert!(!out.starts_with("Springfield"));
    }

    #[test]
    fn test_institution_saint_and_partnership() {
        let mut s = session(&[
            (Category::HealthcareFacility, "St. Mary's Medical Center"),
            (Category::Organization, "Keller & Hart LLP"),
        ]);
        let mut draw = Draw::new(11, &["t"], 0);
        let facility = s
            .institution("St. Mary's Medical Center", &mut draw, 0, true)
            .unwrap();
        assert!(facility.starts_with("St. "));
        assert!(facility.ends_with("'s Medical Center"), "{}", facility);
        assert!(!facility.contains("Mary"));

        let firm = s.institution("Keller & Hart LLP", &mut draw, 0, false).unwrap();
        let words: Vec<&str> = firm.split(' ').collect();
        assert_eq!(words.len(), 4);
        assert!(SURNAMES.contains(&words[0]));
        assert_eq!(words[1], "&");
        assert!(SURNAMES.contains(&words[2]));
        assert_eq!(words[3], "LLP");
    }

    #[test]
    fn test_email_reuses_name_tokens() {
        let mut s = session(&[
            (Category::PersonName, "Dr. Patricia Williams"),
            (Category::EmailAddress, "p.williams@stmarys.org"),
        ]);
        let mut draw = Draw::new(11, &["t"], 0);
        let name = s.person("Dr. Patricia Williams", &mut draw, 0).unwrap();
        let email = s.email("p.williams@stmarys.org", &mut draw, 0).unwrap();

        let words = NameParts::parse(&name).words;
        let expected_local = format!(
            "{}.{}",
            words[0].chars().next().unwrap().to_ascii_lowercase(),
            words[1].to_lowercase()
        );
        let (local, domain) = email.split_once('@').unwrap();
        assert_eq!(local, expected_local);
        assert!(domain.ends_with(".org"));
        assert_ne!(domain, "stmarys.org");
    }

    #[test]
    fn test_email_public_domain_kept() {
        let mut s = session(&[(Category::EmailAddress, "jdoe42@gmail.com")]);
        let mut draw = Draw::new(11, &["t"], 0);
        let email = s.email("jdoe42@gmail.com", &mut draw, 0).unwrap();
        let (local, domain) = email.split_once('@').unwrap();
        assert_eq!(domain, "gmail.com");
        assert_eq!(local.len(), 6);
        assert!(local[4..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_split_segments() {
        assert_eq!(split_segments("p.williams"), vec!["p", ".", "williams"]);
        assert_eq!(split_segments("a__b"), vec!["a", "__", "b"]);
        assert_eq!(split_segments("solo"), vec!["solo"]);
    }
}

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::model::stats::{FounderStats, StatDelta, StatKey};

/// A selectable persona. Pure flavor until the player allocates points
/// and the random traits are rolled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FounderArchetype {
    pub id: String,
    pub name: String,
    pub description: String,
    pub pros: String,
    pub cons: String,
}

/// A buff or debuff. The effect is applied once, to the starting stats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trait {
    pub id: String,
    pub name: String,
    pub description: String,
    pub effect: StatDelta,
}

/// An archetype materialized for one run: allocated aptitudes plus the
/// rolled buff/debuff pair. Discarded when a new game starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FounderProfile {
    pub archetype: FounderArchetype,
    pub stats: FounderStats,
    pub buff: Trait,
    pub debuff: Trait,
}

fn archetype(id: &str, name: &str, description: &str, pros: &str, cons: &str) -> FounderArchetype {
    FounderArchetype {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        pros: pros.into(),
        cons: cons.into(),
    }
}

/// The sixteen MBTI personas, in fixed grid order:
/// analysts, diplomats, sentinels, explorers.
pub fn all_archetypes() -> Vec<FounderArchetype> {
    vec![
        archetype(
            "INTJ",
            "The Architect",
            "Strategic thinker with a plan for everything.",
            "Strategic, efficient",
            "Arrogant, judgmental",
        ),
        archetype(
            "INTP",
            "The Logician",
            "Hardcore geek who would rather be refactoring.",
            "Innovative, logical",
            "Procrastinates, hates networking",
        ),
        archetype(
            "ENTJ",
            "The Commander",
            "A born autocrat CEO.",
            "Strong leadership, goal driven",
            "Dictatorial, impatient",
        ),
        archetype(
            "ENTP",
            "The Debater",
            "Professional contrarian, also an idea machine.",
            "Creative, adaptable",
            "Loses interest fast, goes off-topic",
        ),
        archetype(
            "INFJ",
            "The Advocate",
            "Zen founder whose intuition is scarily accurate.",
            "Insightful, idealistic",
            "Volatile, oversensitive",
        ),
        archetype(
            "INFP",
            "The Mediator",
            "Melancholy poet, founding a company for the feels.",
            "Firm values, deeply empathetic",
            "Impractical, prone to spiraling",
        ),
        archetype(
            "ENFJ",
            "The Protagonist",
            "Cult-grade orator; the team does overtime for the dream.",
            "Infectious energy, great at morale",
            "Too trusting, indecisive",
        ),
        archetype(
            "ENFP",
            "The Campaigner",
            "Social dynamo with a hundred new ideas a day.",
            "Enthusiastic, superb networker",
            "Unfocused, emotional",
        ),
        archetype(
            "ISTJ",
            "The Logistician",
            "Human clockwork, obsessed with process.",
            "Utterly reliable, detail oriented",
            "Rigid, resists change",
        ),
        archetype(
            "ISFJ",
            "The Defender",
            "Den-parent founder who feeds the whole office.",
            "Loyal, patient, service minded",
            "Can't say no, overworks",
        ),
        archetype(
            "ESTJ",
            "The Executive",
            "KPI zealot; a true believer in OKRs.",
            "Master organizer, executes hard",
            "Inflexible, controlling",
        ),
        archetype(
            "ESFJ",
            "The Consul",
            "Smooth operator who keeps ops and admin humming.",
            "Team glue, eager to help",
            "Needs approval, little initiative",
        ),
        archetype(
            "ISTP",
            "The Virtuoso",
            "Full-stack engineer, few words, much shipping.",
            "Technical ace, thrives on hard problems",
            "Unreadable, bores easily",
        ),
        archetype(
            "ISFP",
            "The Adventurer",
            "Aesthete with unreasonable standards for the UI.",
            "Great taste, rolls with change",
            "No long-term plan, checks out",
        ),
        archetype(
            "ESTP",
            "The Entrepreneur",
            "Gambler at heart, goes all-in by default.",
            "Bold, razor sharp instincts",
            "Short-sighted, reckless",
        ),
        archetype(
            "ESFP",
            "The Entertainer",
            "Born performer; the company is the stage.",
            "Brings the hype, lives in the moment",
            "Impatient, avoids conflict",
        ),
    ]
}

fn buffs() -> Vec<Trait> {
    vec![
        Trait {
            id: "rich_parents".into(),
            name: "Trust Fund Baby".into(),
            description: "Family money doubles the runway. (+Cash)".into(),
            effect: StatDelta::of(&[(StatKey::Cash, 100)]),
        },
        Trait {
            id: "ex_google".into(),
            name: "Ex-FAANG".into(),
            description: "Staff-engineer habits keep the codebase clean. (+Product)".into(),
            effect: StatDelta::of(&[(StatKey::Product, 10)]),
        },
        Trait {
            id: "viral_star".into(),
            name: "Influencer".into(),
            description: "A million followers means free distribution. (+Traction)".into(),
            effect: StatDelta::of(&[(StatKey::Traction, 15)]),
        },
        Trait {
            id: "insomniac".into(),
            name: "Sleepless Elite".into(),
            description: "Four hours of sleep, twenty hours of grind. (+Team)".into(),
            effect: StatDelta::of(&[(StatKey::Team, 10)]),
        },
    ]
}

fn debuffs() -> Vec<Trait> {
    vec![
        Trait {
            id: "perfectionist".into(),
            name: "Perfectionist".into(),
            description: "Pixel-level agonizing delays every launch. (+Stress)".into(),
            effect: StatDelta::of(&[(StatKey::Stress, 10)]),
        },
        Trait {
            id: "broke".into(),
            name: "Student Debt".into(),
            description: "Already in the red before day one. (-Cash)".into(),
            effect: StatDelta::of(&[(StatKey::Cash, -20)]),
        },
        Trait {
            id: "awkward".into(),
            name: "Socially Awkward".into(),
            description: "Freezes in front of investors; demo days go badly. (-Traction)".into(),
            effect: StatDelta::of(&[(StatKey::Traction, -10)]),
        },
        Trait {
            id: "toxic".into(),
            name: "Micro-Manager".into(),
            description: "Tracks bathroom breaks; the team is interviewing elsewhere. (-Team)".into(),
            effect: StatDelta::of(&[(StatKey::Team, -15)]),
        },
    ]
}

pub fn random_buff() -> Trait {
    let mut rng = rand::thread_rng();
    buffs().choose(&mut rng).cloned().expect("buff catalog is non-empty")
}

pub fn random_debuff() -> Trait {
    let mut rng = rand::thread_rng();
    debuffs().choose(&mut rng).cloned().expect("debuff catalog is non-empty")
}

const RANDOM_IDEAS: [&str; 7] = [
    "Generative AI: tired of chatbot waffle, and sitting on a corpus of a \
     million pulp novels, you train a model that only writes page-turners.",
    "Embodied AI: lonely urbanites hate chores, and you are an ex Boston \
     Dynamics engineer, so you build a companion robot that also fetches \
     parcels.",
    "Silver economy: your grandmother queued in the cold because the \
     hospital app defeated her, so you, a big-tech UI lead, build a \
     one-button terminal for elders.",
    "Low-altitude economy: your commute is a parking lot and your family \
     owns a drone factory, so you prototype a folding single-seat flying \
     moped for five-kilometer hops.",
    "Consumption downgrade: lunch costs too much and you write crawlers \
     for a living, so you map every near-expiry and clearance deal in \
     the city.",
    "Going global: melodrama shorts sell everywhere and you are good at \
     AI face-swapping, so you localize billionaire-romance serials for \
     overseas markets in one click.",
    "Emotional value: anxiety is at an all-time high and you once studied \
     Buddhist psychology, so you ship a cyber-temple app with a 24/7 \
     AI monk and a tappable wooden fish.",
];

/// A prompt for players who cannot think of a startup on the spot.
pub fn random_idea() -> String {
    let mut rng = rand::thread_rng();
    RANDOM_IDEAS
        .choose(&mut rng)
        .map(|s| s.to_string())
        .expect("idea list is non-empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn archetype_catalog_is_fixed_and_unique() {
        let archetypes = all_archetypes();
        assert_eq!(archetypes.len(), 16);

        let ids: HashSet<_> = archetypes.iter().map(|a| a.id.clone()).collect();
        assert_eq!(ids.len(), 16);

        // Stable order: the grid starts with the analysts.
        assert_eq!(archetypes[0].id, "INTJ");
        assert_eq!(archetypes[15].id, "ESFP");
    }

    #[test]
    fn trait_catalogs_are_disjoint() {
        let buff_ids: HashSet<_> = buffs().into_iter().map(|t| t.id).collect();
        let debuff_ids: HashSet<_> = debuffs().into_iter().map(|t| t.id).collect();
        assert_eq!(buff_ids.len(), 4);
        assert_eq!(debuff_ids.len(), 4);
        assert!(buff_ids.is_disjoint(&debuff_ids));
    }

    #[test]
    fn random_draws_come_from_the_right_catalog() {
        let buff_ids: HashSet<_> = buffs().into_iter().map(|t| t.id).collect();
        let debuff_ids: HashSet<_> = debuffs().into_iter().map(|t| t.id).collect();
        for _ in 0..32 {
            assert!(buff_ids.contains(&random_buff().id));
            assert!(debuff_ids.contains(&random_debuff().id));
        }
    }
}

use crate::model::catalog::FounderProfile;
use crate::model::session::FINAL_MONTH;
use crate::model::stats::GameStats;

/// Persona and ground rules sent with every request. The narrator, not
/// this process, decides stat consequences and endings; the request text
/// tells it how.
pub const SYSTEM_DIRECTIVE: &str = "\
You are the Game Master of a satirical, high-stakes startup simulation \
called \"Founder Simulator\".
Your persona is a cynical, witty, sharp-tongued venture capitalist who \
has seen a thousand pitch decks and funded twelve.

CORE NARRATIVE ENGINE: REAL-WORLD MAPPING (MANDATORY)
Base every scenario, crisis, or opportunity on a real-world startup case \
(anonymized or adapted). Do not invent generic events; remix history.

Reference case index:
1. High-risk marketing gambit: betting the bank on one prime-time ad slot. \
(Outcome: viral fame OR bankruptcy.)
2. Tech disruption shock: a rival ships the same thing 10x cheaper overnight.
3. Cash-flow collapse: deposits run out mid-expansion, growth without profit.
4. Founder drama: boardroom coup, CTO versus CEO, investors picking sides.
5. The pivot arc: the tech fails, the founder starts livestreaming to pay debts.
6. Regulatory hammer: a policy change erases the business model in a week.
7. Viral luck: a random meme makes the product explode overnight.

NARRATIVE STRUCTURE for every scenario description:
1. The real-world echo (hint at the parallel case).
2. The situation you have run into.
3. The assessment of your data, team, and market.
4. The decision point: therefore, you must decide...

Game parameters:
- Timeline: 12 months (one year of runway).
- Stats: cash (k$), team (0-100), product (0-100), traction (0-100), \
stress (0-100, high is bad).
- Winning: survive 12 months with cash above 0 and stress below 100; \
valuation (traction x product) is the score.
- Losing: cash below 0 (bankruptcy) or stress at 100 (burnout). You decide \
when a run ends and say so with the isGameOver flag and endingType.

Output format: JSON only, matching the schema in the request. No prose \
outside the JSON.";

/// Assembles the two request payloads of the session. Formatting only:
/// no parsing, no networking, no session logic.
pub struct RequestBuilder;

impl RequestBuilder {
    /// Opening request: idea analysis plus the month-1 scenario.
    pub fn start_request(profile: &FounderProfile, idea: &str) -> String {
        let mut prompt = String::new();

        prompt.push_str("Start a new game.\n\n");
        push_founder_section(&mut prompt, profile);
        prompt.push_str(&format!("STARTUP IDEA:\n{}\n\n", idea));
        prompt.push_str("Initial funding is $100k (seed round).\n\n");

        prompt.push_str(
            "Task:\n\
             1. ANALYZE the idea before anything happens:\n\
             - Market structure: red ocean, blue ocean, or niche?\n\
             - Trajectory: tech-heavy, operations-heavy, or cash-burning?\n\
             - Put this analysis in the outcomeText field, formatted as \
             [Market] ... [Trajectory] ..., to introduce the game.\n\
             2. Set the opening scene for month 1 using the narrative \
             structure (echo -> situation -> assessment -> decision), \
             with up to three choices.\n\n",
        );

        push_reply_schema(&mut prompt, 1);
        prompt
    }

    /// Mid-run request: consequence of the action, then the next scenario.
    pub fn turn_request(
        profile: &FounderProfile,
        idea: &str,
        stats: &GameStats,
        history: &str,
        action: &str,
        month: i32,
    ) -> String {
        let mut prompt = String::new();

        prompt.push_str("CURRENT STATUS:\n");
        prompt.push_str(&format!("- Month: {}/{}\n", month, FINAL_MONTH));
        prompt.push_str(&format!("- Idea: {}\n", idea));
        push_founder_section(&mut prompt, profile);
        prompt.push_str(&format!(
            "- Stats: cash {}k, team {}, product {}, traction {}, stress {}\n\n",
            stats.cash, stats.team, stats.product, stats.traction, stats.stress
        ));

        if !history.trim().is_empty() {
            prompt.push_str("RECENT HISTORY:\n");
            prompt.push_str(history);
            prompt.push_str("\n\n");
        }

        prompt.push_str(&format!("THE PLAYER JUST DID: \"{}\"\n\n", action));

        prompt.push_str(&format!(
            "Task:\n\
             1. Compute the outcome of the action on the stats and report \
             it in statsChange. Be realistic: a failed gamble burns cash, \
             a win boosts traction.\n\
             2. Write the narrative result of the action in outcomeText, \
             with satirical commentary.\n\
             3. Advance to month {} (unless the run is over).\n\
             4. Create a NEW scenario for month {} from a real case study \
             that fits the current stats:\n\
             - Cash low: a financing crisis or a forced pivot.\n\
             - Product high: a tech-disruption moment or an acquisition offer.\n\
             - Team low: a mass resignation or a founder conflict.\n\n\
             Follow the scenario structure: echo -> situation -> \
             assessment -> decision.\n\n",
            month + 1,
            month + 1
        ));

        push_reply_schema(&mut prompt, month + 1);
        prompt
    }
}

fn push_founder_section(prompt: &mut String, profile: &FounderProfile) {
    prompt.push_str(&format!(
        "- Founder: {} ({})\n",
        profile.archetype.id, profile.archetype.name
    ));
    prompt.push_str(&format!(
        "- Aptitudes: tech {}, vision {}, charisma {}\n",
        profile.stats.tech, profile.stats.vision, profile.stats.charisma
    ));
    prompt.push_str(&format!(
        "- Buff: {} ({})\n- Debuff: {} ({})\n",
        profile.buff.id, profile.buff.name, profile.debuff.id, profile.debuff.name
    ));
}

fn push_reply_schema(prompt: &mut String, month: i32) {
    prompt.push_str(&format!(
        "Reply with JSON matching exactly this schema:\n\
         {{\n\
         \x20 \"outcomeText\": \"string\",\n\
         \x20 \"statsChange\": {{ \"cash\": -10, \"team\": 0, \"product\": 5, \
         \"traction\": 0, \"stress\": 0 }},\n\
         \x20 \"isGameOver\": false,\n\
         \x20 \"endingType\": \"bankruptcy\" | \"burnout\" | \"unicorn\" | \
         \"acquisition\" | \"mediocrity\" | null,\n\
         \x20 \"nextMonth\": {{\n\
         \x20   \"month\": {},\n\
         \x20   \"title\": \"string, a catchy headline\",\n\
         \x20   \"description\": \"string, echo -> situation -> assessment -> decision\",\n\
         \x20   \"choices\": [\n\
         \x20     {{ \"id\": \"1\", \"text\": \"...\", \"type\": \"safe\" }},\n\
         \x20     {{ \"id\": \"2\", \"text\": \"...\", \"type\": \"risky\" }},\n\
         \x20     {{ \"id\": \"3\", \"text\": \"...\", \"type\": \"wild\" }}\n\
         \x20   ]\n\
         \x20 }}\n\
         }}\n\
         statsChange keys are optional; omit what did not change. At most \
         three choices.\n",
        month
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::catalog::{all_archetypes, random_buff, random_debuff};
    use crate::model::stats::FounderStats;

    fn profile() -> FounderProfile {
        FounderProfile {
            archetype: all_archetypes()[2].clone(),
            stats: FounderStats { tech: 3, vision: 3, charisma: 4 },
            buff: random_buff(),
            debuff: random_debuff(),
        }
    }

    #[test]
    fn start_request_carries_profile_and_idea() {
        let p = profile();
        let prompt = RequestBuilder::start_request(&p, "a cat translator");

        assert!(prompt.contains("Start a new game"));
        assert!(prompt.contains(&p.archetype.id));
        assert!(prompt.contains("tech 3, vision 3, charisma 4"));
        assert!(prompt.contains(&p.buff.id));
        assert!(prompt.contains(&p.debuff.id));
        assert!(prompt.contains("a cat translator"));
        assert!(prompt.contains("\"month\": 1"));
    }

    #[test]
    fn turn_request_carries_state_action_and_next_month() {
        let p = profile();
        let stats = GameStats { cash: -20, ..GameStats::default() };
        let prompt = RequestBuilder::turn_request(
            &p,
            "a cat translator",
            &stats,
            "Month 1: it began",
            "hire a CFO",
            4,
        );

        assert!(prompt.contains("Month: 4/12"));
        assert!(prompt.contains("cash -20k"));
        assert!(prompt.contains("RECENT HISTORY:\nMonth 1: it began"));
        assert!(prompt.contains("\"hire a CFO\""));
        assert!(prompt.contains("Advance to month 5"));
        assert!(prompt.contains("\"month\": 5"));
    }

    #[test]
    fn empty_history_is_omitted() {
        let p = profile();
        let prompt = RequestBuilder::turn_request(
            &p,
            "idea",
            &GameStats::default(),
            "",
            "act",
            1,
        );
        assert!(!prompt.contains("RECENT HISTORY"));
    }
}

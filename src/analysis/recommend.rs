use crate::domain::model::{
    CertificationRecommendation, DemandLevel, FrameworkRecommendation, MarketAnalysis,
    MarketOpportunity, Recommendations, SkillRecommendation,
};

const MAX_SKILLS: usize = 10;
const MAX_FRAMEWORKS: usize = 5;
const MAX_CERTIFICATIONS: usize = 5;
const MAX_OPPORTUNITIES: usize = 5;

const NETWORKING_TIPS: &[&str] = &[
    "Optimize your LinkedIn profile around the most in-demand technologies",
    "Attend tech events in the cities with the most job openings",
    "Earn certifications in the most sought-after domains",
    "Build portfolio projects using the popular frameworks",
    "Join professional communities around emerging technologies",
];

/// Turns ranked market statistics into actionable career guidance.
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn generate(analysis: &MarketAnalysis) -> Recommendations {
        let top_skills_to_learn = analysis
            .top_technologies
            .iter()
            .take(MAX_SKILLS)
            .map(|entry| SkillRecommendation {
                technology: entry.name.clone(),
                job_count: entry.count,
                priority: skill_priority(entry.count),
            })
            .collect();

        let emerging_technologies = analysis
            .top_frameworks
            .iter()
            .take(MAX_FRAMEWORKS)
            .map(|entry| FrameworkRecommendation {
                framework: entry.name.clone(),
                usage_frequency: entry.count,
                learning_recommendation: learning_recommendation(&entry.name),
            })
            .collect();

        let certification_priorities = analysis
            .top_certifications
            .iter()
            .take(MAX_CERTIFICATIONS)
            .map(|entry| CertificationRecommendation {
                certification: entry.name.clone(),
                demand_level: entry.count,
                estimated_roi: certification_roi(&entry.name).to_string(),
            })
            .collect();

        let market_opportunities = analysis
            .top_locations
            .iter()
            .take(MAX_OPPORTUNITIES)
            .map(|entry| MarketOpportunity {
                location: entry.name.clone(),
                job_availability: entry.count,
                market_attractiveness: market_attractiveness(entry.count),
            })
            .collect();

        Recommendations {
            top_skills_to_learn,
            emerging_technologies,
            certification_priorities,
            market_opportunities,
            recruiter_networking_tips: NETWORKING_TIPS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

fn skill_priority(job_count: usize) -> DemandLevel {
    if job_count > 10 {
        DemandLevel::High
    } else if job_count > 5 {
        DemandLevel::Medium
    } else {
        DemandLevel::Low
    }
}

fn market_attractiveness(job_count: usize) -> DemandLevel {
    if job_count > 20 {
        DemandLevel::High
    } else if job_count > 10 {
        DemandLevel::Medium
    } else {
        DemandLevel::Low
    }
}

fn learning_recommendation(framework: &str) -> String {
    let platform = match framework {
        "React" => "React Official Docs + freeCodeCamp",
        "Angular" => "Angular University + Pluralsight",
        "Vue.js" => "Vue Mastery + Udemy",
        "Django" => "Django Official Tutorial + Real Python",
        "Flask" => "Flask Mega-Tutorial + YouTube",
        "Spring" => "Spring.io Guides + Baeldung",
        _ => "Official documentation + Udemy/Coursera",
    };
    format!("Recommended platform: {}", platform)
}

fn certification_roi(certification: &str) -> &'static str {
    const HIGH_ROI: &[&str] = &["AWS", "Azure", "GCP", "CISSP", "CISM", "PMP"];
    const MEDIUM_ROI: &[&str] = &["Docker", "Kubernetes", "Scrum", "DevOps"];

    if HIGH_ROI.iter().any(|c| certification.contains(c)) {
        "High ROI (15-30% salary increase potential)"
    } else if MEDIUM_ROI.iter().any(|c| certification.contains(c)) {
        "Medium ROI (10-20% salary increase potential)"
    } else {
        "Variable ROI (5-15% salary increase potential)"
    }
}

// Résumé analysis: prompt, structured-output contract, typed result, error payloads.
// All model calls go through llm_client; nothing here talks HTTP directly.

pub mod analyzer;
pub mod payload;
pub mod prompts;
pub mod result;
pub mod schema;

pub use analyzer::ResumeAnalyzer;
pub use payload::ErrorPayload;
pub use result::AnalysisResult;

/// A schema-conformant document, shared by tests across modules.
#[cfg(test)]
pub(crate) fn sample_result_json() -> serde_json::Value {
    serde_json::json!({
        "candidate_info": {
            "name": "Jane Doe",
            "title": "Backend Engineer",
            "career_persona": "Pragmatic systems builder",
            "readiness_score": 68
        },
        "ats_analysis": {
            "overall_score": 72,
            "section_scores": {"quantification": 55, "experience": 80, "tech_stack": 78, "education": 70},
            "breakdown": {"skill_match": 75, "keyword_match": 64, "experience_relevance": 81, "formatting_quality": 70},
            "explanation": {
                "executive_summary": "Solid backend profile with gaps in streaming.",
                "keyword_parity": "Kafka and gRPC are missing.",
                "quantification_review": "Only two bullets carry numbers.",
                "structural_feedback": "Move skills above education."
            }
        },
        "market_intel": {
            "salary_range_usd": "$140k - $175k",
            "salary_range_inr": "₹35L - ₹50L",
            "market_demand": "High",
            "top_competencies": ["Rust", "Distributed systems"]
        },
        "advanced_insights": {
            "technical_depth_scouter": "Depth in async Rust is evident.",
            "culture_fit_predictor": "Fits a small, ownership-heavy team.",
            "faang_matchmaker": "Closest to infrastructure orgs.",
            "skill_radar": {"Technical": 80, "Leadership": 45, "Communication": 60, "Problem Solving": 75, "Innovation": 55},
            "skills_gap_chart": [
                {"skill": "Kafka", "required": 80, "possessed": 20},
                {"skill": "Rust", "required": 90, "possessed": 85}
            ]
        },
        "recruiter_review": {
            "decision": "Maybe",
            "honest_feedback": "Strong core, weak evidence of impact.",
            "critical_fail_points": ["No streaming experience"],
            "key_strengths": ["Rust", "Ownership"]
        },
        "resume_tailoring": {
            "new_summary": "Backend engineer shipping low-latency Rust services.",
            "optimized_skills": ["Rust", "Tokio", "PostgreSQL"],
            "enhanced_bullets": [
                {"original": "Worked on APIs", "improved": "Built 4 REST APIs serving 2M req/day", "impact": "Shows scale"}
            ],
            "linkedin_tips": ["Lead the headline with Rust"],
            "cover_letter": "Dear Hiring Manager,\n\nI am writing...\n\nSincerely,\nJane"
        },
        "skill_gap_analysis": {
            "missing_technical_skills": ["Kafka"],
            "missing_soft_skills": ["Mentoring"],
            "recommended_projects": [
                {"title": "Event pipeline", "description": "Kafka to Postgres sink", "tech_stack": ["Rust", "Kafka"]}
            ],
            "certifications": ["CKAD"]
        },
        "interview_prep": {
            "technical_questions": ["How does Tokio schedule tasks?"],
            "behavioral_questions": ["Tell me about a production incident."]
        },
        "career_roadmap": {
            "learning_plan_6_months": [
                {"month": 1, "focus": "Kafka fundamentals"},
                {"month": 2, "focus": "Stream processing"}
            ],
            "final_advice": "Quantify everything."
        }
    })
}

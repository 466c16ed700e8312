//! Typed analysis records. `schema::analysis_schema()` is generated from these, so
//! serde renames here are what the model is asked to produce.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResult {
    pub candidate_info: CandidateInfo,
    pub ats_analysis: AtsAnalysis,
    pub market_intel: MarketIntel,
    pub advanced_insights: AdvancedInsights,
    pub recruiter_review: RecruiterReview,
    pub resume_tailoring: ResumeTailoring,
    pub skill_gap_analysis: SkillGapAnalysis,
    pub interview_prep: InterviewPrep,
    pub career_roadmap: CareerRoadmap,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CandidateInfo {
    pub name: String,
    pub title: String,
    pub career_persona: String,
    pub readiness_score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AtsAnalysis {
    pub overall_score: i64,
    pub section_scores: SectionScores,
    pub breakdown: ScoreBreakdown,
    pub explanation: AtsExplanation,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SectionScores {
    pub quantification: i64,
    pub experience: i64,
    pub tech_stack: i64,
    pub education: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScoreBreakdown {
    pub skill_match: i64,
    pub keyword_match: i64,
    pub experience_relevance: i64,
    pub formatting_quality: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AtsExplanation {
    pub executive_summary: String,
    pub keyword_parity: String,
    pub quantification_review: String,
    pub structural_feedback: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum MarketDemand {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MarketIntel {
    pub salary_range_usd: String,
    pub salary_range_inr: String,
    pub market_demand: MarketDemand,
    pub top_competencies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AdvancedInsights {
    pub technical_depth_scouter: String,
    pub culture_fit_predictor: String,
    pub faang_matchmaker: String,
    pub skill_radar: SkillRadar,
    pub skills_gap_chart: Vec<SkillGapPoint>,
}

/// Five-axis radar scores, 0-100 each.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SkillRadar {
    #[serde(rename = "Technical")]
    pub technical: i64,
    #[serde(rename = "Leadership")]
    pub leadership: i64,
    #[serde(rename = "Communication")]
    pub communication: i64,
    #[serde(rename = "Problem Solving")]
    pub problem_solving: i64,
    #[serde(rename = "Innovation")]
    pub innovation: i64,
}

impl SkillRadar {
    pub fn axes(&self) -> [(&'static str, i64); 5] {
        [
            ("Technical", self.technical),
            ("Leadership", self.leadership),
            ("Communication", self.communication),
            ("Problem Solving", self.problem_solving),
            ("Innovation", self.innovation),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SkillGapPoint {
    pub skill: String,
    pub required: i64,
    pub possessed: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum Decision {
    Shortlisted,
    Rejected,
    Maybe,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecruiterReview {
    pub decision: Decision,
    pub honest_feedback: String,
    pub critical_fail_points: Vec<String>,
    pub key_strengths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ResumeTailoring {
    pub new_summary: String,
    pub optimized_skills: Vec<String>,
    pub enhanced_bullets: Vec<EnhancedBullet>,
    pub linkedin_tips: Vec<String>,
    pub cover_letter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EnhancedBullet {
    pub original: String,
    pub improved: String,
    pub impact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SkillGapAnalysis {
    pub missing_technical_skills: Vec<String>,
    pub missing_soft_skills: Vec<String>,
    pub recommended_projects: Vec<RecommendedProject>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecommendedProject {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InterviewPrep {
    pub technical_questions: Vec<String>,
    pub behavioral_questions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CareerRoadmap {
    pub learning_plan_6_months: Vec<MonthlyFocus>,
    pub final_advice: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MonthlyFocus {
    pub month: i64,
    pub focus: String,
}

//! Server-side rendering of the single analysis page.
//!
//! The page template lives in `templates/index.html` and is compiled into the binary.
//! Placeholders are `{{name}}`; values are substituted in one pass, so text coming
//! from the user or the model is never re-scanned for placeholders.

use std::fmt::Write;

use crate::analysis::result::{AnalysisResult, Decision, MarketDemand};
use crate::analysis::ErrorPayload;

const PAGE_TEMPLATE: &str = include_str!("../../templates/index.html");

pub enum Outcome<'a> {
    Analysis(&'a AnalysisResult),
    Error(&'a ErrorPayload),
}

/// Everything the page needs for one response.
pub struct PageView<'a> {
    pub job_description: &'a str,
    /// Stored upload id to resubmit with (quota-exhaustion retry only).
    pub existing_filename: Option<&'a str>,
    pub outcome: Option<Outcome<'a>>,
}

impl PageView<'static> {
    pub fn empty() -> Self {
        PageView {
            job_description: "",
            existing_filename: None,
            outcome: None,
        }
    }
}

pub fn render_page(view: &PageView<'_>) -> String {
    let result = match &view.outcome {
        Some(Outcome::Analysis(result)) => render_analysis(result),
        Some(Outcome::Error(payload)) => render_error(payload),
        None => String::new(),
    };

    let upload_field = render_upload_field(view.existing_filename);
    let job_description = escape_html(view.job_description);

    fill_template(
        PAGE_TEMPLATE,
        &[
            ("upload_field", upload_field.as_str()),
            ("job_description", job_description.as_str()),
            ("result", result.as_str()),
        ],
    )
}

/// Replaces `{{key}}` markers in a single left-to-right pass. Unknown markers are kept.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = after[..end].trim();
                match values.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&rest[start..start + 2 + end + 2]),
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn render_upload_field(existing_filename: Option<&str>) -> String {
    match existing_filename {
        Some(id) => format!(
            r#"<div class="retry">Your résumé is still on file. Add your own API key below and submit again; no need to re-upload.</div>
    <input type="hidden" name="existing_filename" value="{}">
    <label for="resume">Replace résumé (optional, PDF)</label>
    <input type="file" id="resume" name="resume" accept="application/pdf,.pdf">"#,
            escape_html(id)
        ),
        None => r#"<label for="resume">Résumé (PDF)</label>
    <input type="file" id="resume" name="resume" accept="application/pdf,.pdf">"#
            .to_string(),
    }
}

fn render_error(payload: &ErrorPayload) -> String {
    let mut html = String::from(r#"<section class="error">"#);
    let _ = write!(html, "<h2>{}</h2>", escape_html(&payload.error));
    if let Some(message) = &payload.message {
        let _ = write!(html, "<p>{}</p>", escape_html(message));
    }
    if let Some(details) = &payload.details {
        let _ = write!(
            html,
            "<details><summary>Details</summary><pre>{}</pre></details>",
            escape_html(details)
        );
    }
    if let Some(diagnostics) = &payload.diagnostics {
        let _ = write!(
            html,
            "<details><summary>Diagnostics</summary><p>Current model: {}</p>{}</details>",
            escape_html(&diagnostics.current_model),
            render_list(&diagnostics.available_models)
        );
    }
    html.push_str("</section>");
    html
}

fn render_list(items: &[String]) -> String {
    let mut html = String::from("<ul>");
    for item in items {
        let _ = write!(html, "<li>{}</li>", escape_html(item));
    }
    html.push_str("</ul>");
    html
}

fn prose(title: &str, text: &str) -> String {
    format!(
        r#"<h3>{}</h3><div class="prose">{}</div>"#,
        escape_html(title),
        escape_html(text)
    )
}

fn decision_label(decision: Decision) -> &'static str {
    match decision {
        Decision::Shortlisted => "Shortlisted",
        Decision::Rejected => "Rejected",
        Decision::Maybe => "Maybe",
    }
}

fn demand_label(demand: MarketDemand) -> &'static str {
    match demand {
        MarketDemand::High => "High",
        MarketDemand::Medium => "Medium",
        MarketDemand::Low => "Low",
    }
}

fn render_analysis(result: &AnalysisResult) -> String {
    let mut html = String::from(r#"<section id="analysis">"#);

    let info = &result.candidate_info;
    let ats = &result.ats_analysis;
    let _ = write!(
        html,
        r#"<div class="card"><h2>{}</h2><p>{} · {}</p><p>Readiness: {}/100</p></div>"#,
        escape_html(&info.name),
        escape_html(&info.title),
        escape_html(&info.career_persona),
        info.readiness_score
    );

    let _ = write!(
        html,
        r#"<div class="card"><h2>ATS score</h2><div class="score">{}</div><table>
<tr><th>Quantification</th><td>{}</td><th>Skill match</th><td>{}</td></tr>
<tr><th>Experience</th><td>{}</td><th>Keyword match</th><td>{}</td></tr>
<tr><th>Tech stack</th><td>{}</td><th>Experience relevance</th><td>{}</td></tr>
<tr><th>Education</th><td>{}</td><th>Formatting quality</th><td>{}</td></tr>
</table>"#,
        ats.overall_score,
        ats.section_scores.quantification,
        ats.breakdown.skill_match,
        ats.section_scores.experience,
        ats.breakdown.keyword_match,
        ats.section_scores.tech_stack,
        ats.breakdown.experience_relevance,
        ats.section_scores.education,
        ats.breakdown.formatting_quality
    );
    html.push_str(&prose("Executive summary", &ats.explanation.executive_summary));
    html.push_str(&prose("Keyword parity", &ats.explanation.keyword_parity));
    html.push_str(&prose(
        "Quantification review",
        &ats.explanation.quantification_review,
    ));
    html.push_str(&prose("Structural feedback", &ats.explanation.structural_feedback));
    html.push_str("</div>");

    let review = &result.recruiter_review;
    let _ = write!(
        html,
        r#"<div class="card"><h2>Recruiter verdict: {}</h2>"#,
        decision_label(review.decision)
    );
    html.push_str(&prose("Honest feedback", &review.honest_feedback));
    html.push_str("<h3>Critical fail points</h3>");
    html.push_str(&render_list(&review.critical_fail_points));
    html.push_str("<h3>Key strengths</h3>");
    html.push_str(&render_list(&review.key_strengths));
    html.push_str("</div>");

    let market = &result.market_intel;
    let _ = write!(
        html,
        r#"<div class="card"><h2>Market intel</h2><p>Demand: {}</p><p>Salary (USD): {}</p><p>Salary (INR): {}</p>"#,
        demand_label(market.market_demand),
        escape_html(&market.salary_range_usd),
        escape_html(&market.salary_range_inr)
    );
    html.push_str(&render_list(&market.top_competencies));
    html.push_str("</div>");

    let insights = &result.advanced_insights;
    html.push_str(r#"<div class="card"><h2>Advanced insights</h2><table>"#);
    for (axis, score) in insights.skill_radar.axes() {
        let _ = write!(html, "<tr><th>{axis}</th><td>{score}</td></tr>");
    }
    html.push_str("</table><table><tr><th>Skill</th><th>Required</th><th>Possessed</th></tr>");
    for point in &insights.skills_gap_chart {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&point.skill),
            point.required,
            point.possessed
        );
    }
    html.push_str("</table>");
    html.push_str(&prose("Technical depth", &insights.technical_depth_scouter));
    html.push_str(&prose("Culture fit", &insights.culture_fit_predictor));
    html.push_str(&prose("FAANG matchmaker", &insights.faang_matchmaker));
    html.push_str("</div>");

    let tailoring = &result.resume_tailoring;
    html.push_str(r#"<div class="card"><h2>Resume tailoring</h2>"#);
    html.push_str(&prose("New summary", &tailoring.new_summary));
    html.push_str("<h3>Optimized skills</h3>");
    html.push_str(&render_list(&tailoring.optimized_skills));
    html.push_str("<h3>Enhanced bullets</h3><table><tr><th>Original</th><th>Improved</th><th>Impact</th></tr>");
    for bullet in &tailoring.enhanced_bullets {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&bullet.original),
            escape_html(&bullet.improved),
            escape_html(&bullet.impact)
        );
    }
    html.push_str("</table><h3>LinkedIn tips</h3>");
    html.push_str(&render_list(&tailoring.linkedin_tips));
    html.push_str(&prose("Cover letter", &tailoring.cover_letter));
    html.push_str("</div>");

    let gaps = &result.skill_gap_analysis;
    html.push_str(r#"<div class="card"><h2>Skill gaps</h2><h3>Technical</h3>"#);
    html.push_str(&render_list(&gaps.missing_technical_skills));
    html.push_str("<h3>Soft skills</h3>");
    html.push_str(&render_list(&gaps.missing_soft_skills));
    html.push_str("<h3>Recommended projects</h3>");
    for project in &gaps.recommended_projects {
        let _ = write!(
            html,
            "<h4>{}</h4><p>{}</p><p>{}</p>",
            escape_html(&project.title),
            escape_html(&project.description),
            escape_html(&project.tech_stack.join(", "))
        );
    }
    html.push_str("<h3>Certifications</h3>");
    html.push_str(&render_list(&gaps.certifications));
    html.push_str("</div>");

    let prep = &result.interview_prep;
    html.push_str(r#"<div class="card"><h2>Interview prep</h2><h3>Technical</h3>"#);
    html.push_str(&render_list(&prep.technical_questions));
    html.push_str("<h3>Behavioral</h3>");
    html.push_str(&render_list(&prep.behavioral_questions));
    html.push_str("</div>");

    let roadmap = &result.career_roadmap;
    html.push_str(r#"<div class="card"><h2>Six-month roadmap</h2><table>"#);
    for step in &roadmap.learning_plan_6_months {
        let _ = write!(
            html,
            "<tr><th>Month {}</th><td>{}</td></tr>",
            step.month,
            escape_html(&step.focus)
        );
    }
    html.push_str("</table>");
    html.push_str(&prose("Final advice", &roadmap.final_advice));
    html.push_str("</div>");

    // Raw document for client-side charts.
    let json = serde_json::to_string(result).unwrap_or_default();
    let _ = write!(
        html,
        r#"<script type="application/json" id="analysis-data">{}</script>"#,
        json.replace('<', "\\u003c")
    );

    html.push_str("</section>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sample_result_json;

    fn sample_result() -> AnalysisResult {
        serde_json::from_value(sample_result_json()).unwrap()
    }

    #[test]
    fn test_fill_template_is_single_pass() {
        let out = fill_template(
            "A {{first}} B {{second}}",
            &[("first", "{{second}}"), ("second", "two")],
        );
        assert_eq!(out, "A {{second}} B two");
    }

    #[test]
    fn test_fill_template_keeps_unknown_and_unclosed_markers() {
        assert_eq!(fill_template("x {{nope}} y", &[]), "x {{nope}} y");
        assert_eq!(fill_template("x {{open", &[("open", "v")]), "x {{open");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_empty_page_has_form_and_no_result() {
        let page = render_page(&PageView::empty());
        assert!(page.contains(r#"name="resume""#));
        assert!(page.contains(r#"name="job_description""#));
        assert!(!page.contains("existing_filename"));
        assert!(!page.contains(r#"class="error""#));
        assert!(!page.contains("{{"));
    }

    #[test]
    fn test_job_description_is_echoed_escaped() {
        let page = render_page(&PageView {
            job_description: "Rust <senior> {{result}}",
            existing_filename: None,
            outcome: None,
        });
        assert!(page.contains("Rust &lt;senior&gt; {{result}}"));
    }

    #[test]
    fn test_error_page_shows_payload() {
        let payload = ErrorPayload::new("Please upload a PDF resume.");
        let page = render_page(&PageView {
            job_description: "",
            existing_filename: None,
            outcome: Some(Outcome::Error(&payload)),
        });
        assert!(page.contains(r#"class="error""#));
        assert!(page.contains("Please upload a PDF resume."));
    }

    #[test]
    fn test_retry_page_carries_hidden_filename() {
        let payload = ErrorPayload::resource_exhausted("429 RESOURCE_EXHAUSTED.");
        let page = render_page(&PageView {
            job_description: "jd",
            existing_filename: Some("abc-123.pdf"),
            outcome: Some(Outcome::Error(&payload)),
        });
        assert!(page.contains(r#"<input type="hidden" name="existing_filename" value="abc-123.pdf">"#));
        assert!(page.contains("RESOURCE_EXHAUSTED"));
    }

    #[test]
    fn test_analysis_page_renders_sections() {
        let result = sample_result();
        let page = render_page(&PageView {
            job_description: "jd",
            existing_filename: None,
            outcome: Some(Outcome::Analysis(&result)),
        });
        assert!(page.contains("Jane Doe"));
        assert!(page.contains(r#"<div class="score">72</div>"#));
        assert!(page.contains("Recruiter verdict: Maybe"));
        assert!(page.contains("Month 2"));
        assert!(page.contains(r#"id="analysis-data""#));
        assert!(!page.contains(r#"class="error""#));
    }

    #[test]
    fn test_model_text_cannot_inject_markup() {
        let mut result = sample_result();
        result.candidate_info.name = "<script>alert(1)</script>".to_string();
        let page = render_page(&PageView {
            job_description: "",
            existing_filename: None,
            outcome: Some(Outcome::Analysis(&result)),
        });
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }
}

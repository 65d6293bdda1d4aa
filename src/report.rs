//! Markdown rendering of a problem outcome.

use crate::matrix::intensity_label;
use crate::problem::ProblemOutcome;
use crate::ranking::Ranking;
use crate::session::Advisory;

fn push_advisories(out: &mut String, advisories: &[Advisory]) {
    for advisory in advisories {
        out.push_str(&format!("> **Warning:** {}\n", advisory.message()));
    }
    if !advisories.is_empty() {
        out.push('\n');
    }
}

fn push_ranked_table(
    out: &mut String,
    score_label: &str,
    names: &[String],
    scores: &[f64],
    ranking: &Ranking,
) {
    out.push_str(&format!("| Rank | Alternative | {score_label} |\n"));
    out.push_str("|---:|---|---:|\n");
    for (pos, &idx) in ranking.order.iter().enumerate() {
        let name = names.get(idx).map(String::as_str).unwrap_or("?");
        out.push_str(&format!("| {} | {} | {:.4} |\n", pos + 1, name, scores[idx]));
    }
    if let Some(best) = ranking.best() {
        let name = names.get(best).map(String::as_str).unwrap_or("?");
        out.push_str(&format!(
            "\nBest alternative: **{}** ({:.4})\n",
            name, scores[best]
        ));
    }
}

fn push_scale_legend(out: &mut String) {
    out.push_str("<details><summary>Comparison scale</summary>\n\n");
    out.push_str("| Intensity | Meaning |\n|---:|---|\n");
    for (intensity, label) in (1..=9u8).filter_map(|i| intensity_label(i).map(|l| (i, l))) {
        out.push_str(&format!("| {intensity} | {label} |\n"));
    }
    out.push_str("\n</details>\n\n");
}

pub fn render_markdown(outcome: &ProblemOutcome) -> String {
    let mut out = String::new();
    out.push_str("# Site Selection Report\n\n");

    let weighting = &outcome.weighting.result;
    out.push_str("## Criteria Weights (AHP)\n\n");
    out.push_str("| Criterion | Weight |\n|---|---:|\n");
    for (name, w) in outcome.criteria.iter().zip(&weighting.weights) {
        out.push_str(&format!("| {} | {:.4} |\n", name, w));
    }
    out.push_str(&format!(
        "\n- λmax: {:.4}\n- CI: {:.4}\n- RI: {:.2}\n- Consistency ratio: {:.4}\n\n",
        weighting.lambda_max,
        weighting.consistency_index,
        weighting.random_index,
        weighting.consistency_ratio
    ));
    push_advisories(&mut out, &outcome.weighting.advisories);
    push_scale_legend(&mut out);

    if let Some(distance) = &outcome.distance {
        out.push_str("## TOPSIS\n\n");
        push_advisories(&mut out, &distance.advisories);
        push_ranked_table(
            &mut out,
            "TOPSIS Score",
            &outcome.alternatives,
            &distance.result.scores,
            &distance.result.ranking,
        );
        out.push('\n');
    }

    if let Some(profile) = &outcome.profile {
        let result = &profile.assessed.result;
        out.push_str("## Profile Matching\n\n");
        out.push_str("### Factor Summary\n\n");
        out.push_str("| Criterion | AHP Weight | Factor |\n|---|---:|:---:|\n");
        for ((name, w), group) in outcome
            .criteria
            .iter()
            .zip(&weighting.weights)
            .zip(&profile.grouping)
        {
            out.push_str(&format!("| {} | {:.4} | {} |\n", name, w, group.short()));
        }
        let total = result.core_weight + result.secondary_weight;
        let percent = |w: f64| if total > 0.0 { w / total * 100.0 } else { 0.0 };
        out.push_str(&format!(
            "\n- Core factor (CF) weight: {:.4} ({:.2}%)\n- Secondary factor (SF) weight: {:.4} ({:.2}%)\n\n",
            result.core_weight,
            percent(result.core_weight),
            result.secondary_weight,
            percent(result.secondary_weight)
        ));
        push_advisories(&mut out, &profile.assessed.advisories);
        push_ranked_table(
            &mut out,
            "Profile Matching Score",
            &profile.alternatives,
            &result.scores,
            &result.ranking,
        );
        out.push('\n');
    }

    if let Some(agreement) = &outcome.agreement {
        out.push_str("## Method Agreement\n\n");
        out.push_str(&format!(
            "- Kendall tau: {:.3}\n- Spearman rho: {:.3}\n- Same winner: {}\n",
            agreement.kendall_tau, agreement.spearman_rho, agreement.same_winner
        ));
    }

    out
}

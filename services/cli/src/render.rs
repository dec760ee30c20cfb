use nexus_watch::nexus::report::views::{EvaluationRowView, JurisdictionRow};
use nexus_watch::nexus::report::JurisdictionInsight;
use nexus_watch::nexus::{EvaluationResult, NexusReport, NexusSummary, ScenarioComparison};
use std::io::{self, Write};

pub(crate) fn render_jurisdictions<W: Write + ?Sized>(
    out: &mut W,
    rows: &[JurisdictionRow],
) -> io::Result<()> {
    writeln!(out, "Jurisdiction reference table ({} entries)", rows.len())?;
    for row in rows {
        if !row.has_tax {
            writeln!(out, "- {} {}: no statewide sales tax", row.code, row.name)?;
            continue;
        }

        let revenue = row
            .revenue_threshold
            .map(|threshold| format!("${threshold:.0}"))
            .unwrap_or_else(|| "n/a".to_string());
        let transactions = row
            .transaction_threshold
            .map(|threshold| threshold.to_string())
            .unwrap_or_else(|| "n/a".to_string());
        let marketplace = if row.exclude_marketplace_sales {
            "excluded"
        } else {
            "counted"
        };

        writeln!(
            out,
            "- {} {}: {} | revenue {} | transactions {} | marketplace sales {}",
            row.code, row.name, row.threshold_label, revenue, transactions, marketplace
        )?;
    }
    Ok(())
}

pub(crate) fn render_report<W: Write + ?Sized>(out: &mut W, report: &NexusReport) -> io::Result<()> {
    writeln!(out, "Economic nexus report (as of {})", report.as_of)?;
    render_summary(out, &report.summary)?;

    let views = report.views();
    let flagged: Vec<&EvaluationRowView> = views
        .iter()
        .filter(|view| view.risk_level.requires_action() || view.anomaly.is_some())
        .collect();

    if flagged.is_empty() {
        writeln!(out, "\nJurisdictions requiring action: none")?;
    } else {
        writeln!(out, "\nJurisdictions requiring action")?;
        for view in flagged {
            render_row(out, view)?;
        }
    }

    let monitored: Vec<&EvaluationRowView> = views
        .iter()
        .filter(|view| !view.risk_level.requires_action() && view.percent_complete > 0.0)
        .collect();
    if !monitored.is_empty() {
        writeln!(out, "\nOther jurisdictions with sales")?;
        for view in monitored {
            render_row(out, view)?;
        }
    }

    Ok(())
}

pub(crate) fn render_scenario<W: Write + ?Sized>(
    out: &mut W,
    scenario: &ScenarioComparison,
) -> io::Result<()> {
    writeln!(out, "Growth scenario: {:+.1}%", scenario.growth_percent)?;

    writeln!(out, "\nCurrent")?;
    render_summary(out, &scenario.current.summary)?;
    writeln!(out, "\nProjected")?;
    render_summary(out, &scenario.projected.summary)?;

    if scenario.new_nexus_jurisdictions.is_empty() {
        writeln!(out, "\nNewly triggered jurisdictions: none")?;
        return Ok(());
    }

    writeln!(out, "\nNewly triggered jurisdictions")?;
    for result in scenario
        .projected
        .results
        .iter()
        .filter(|result| scenario.new_nexus_jurisdictions.contains(&result.jurisdiction_code))
    {
        render_row(out, &EvaluationRowView::from(result))?;
    }
    Ok(())
}

pub(crate) fn render_insight<W: Write + ?Sized>(
    out: &mut W,
    result: &EvaluationResult,
    insight: &JurisdictionInsight,
) -> io::Result<()> {
    writeln!(out, "{}", insight.headline)?;
    render_row(out, &EvaluationRowView::from(result))?;

    if !insight.observations.is_empty() {
        writeln!(out, "\nObservations")?;
        for note in &insight.observations {
            writeln!(out, "- {note}")?;
        }
    }

    if !insight.recommended_actions.is_empty() {
        writeln!(out, "\nRecommended actions")?;
        for action in &insight.recommended_actions {
            writeln!(out, "- {action}")?;
        }
    }
    Ok(())
}

fn render_summary<W: Write + ?Sized>(out: &mut W, summary: &NexusSummary) -> io::Result<()> {
    writeln!(out, "{} jurisdictions evaluated", summary.total)?;
    for tier in summary.tier_counts() {
        writeln!(out, "- {}: {}", tier.label, tier.count)?;
    }
    Ok(())
}

fn render_row<W: Write + ?Sized>(out: &mut W, view: &EvaluationRowView) -> io::Result<()> {
    write!(
        out,
        "- [{}] {} ({}): {:.1}% of threshold, trigger {}, revenue ${:.2}, {} transaction(s)",
        view.risk_label,
        view.jurisdiction_name,
        view.jurisdiction_code,
        view.percent_complete,
        view.trigger_label,
        view.applicable_revenue,
        view.applicable_transactions
    )?;
    if let Some(anomaly) = view.anomaly {
        write!(out, " | rule anomaly: {anomaly}")?;
    }
    writeln!(out)
}

//! Markdown report of computed filter rules.
//!
//! Layout per filter key:
//! 1. `## key` heading
//! 2. one `### Configuration N` block per configuration, listing served
//!    characters (imperfect ones marked `^`) and a slot table
//! 3. an optional appendix echoing the visible builds

use std::fmt::{self, Write};

use filter_core::{
    Build, BuildGroup, Composition, FilterGroup, MainStat, MainStatChoice, SetConfig,
    SlotChanceDetail, SlotConfig, SlotKind, SubStatSet, compute_fixed_main_chance,
    compute_slot_chance_details,
};

/// Renders filter groups, optionally followed by the builds they came from.
pub fn render_markdown(rules: &[FilterGroup], builds: Option<&[BuildGroup]>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, rules, builds);
    out
}

/// `0.1234` becomes `12.34%`.
pub fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

fn write_report(out: &mut String, rules: &[FilterGroup], builds: Option<&[BuildGroup]>) -> fmt::Result {
    writeln!(out, "# Artifact Filter Configurations")?;
    writeln!(out)?;

    if rules.is_empty() {
        writeln!(out, "_No filter rules._")?;
        writeln!(out)?;
    }

    for group in rules {
        writeln!(out, "## {}", group.key)?;
        writeln!(out)?;
        for (index, config) in group.configurations.iter().enumerate() {
            write_configuration(out, config, index + 1)?;
        }
    }

    if let Some(builds) = builds {
        write_builds_appendix(out, builds)?;
    }
    Ok(())
}

// ============================================================================
// Configurations
// ============================================================================

fn write_configuration(out: &mut String, config: &SetConfig, number: usize) -> fmt::Result {
    writeln!(out, "### Configuration {}", number)?;
    writeln!(out)?;

    let four_piece = served_names(config, true);
    if !four_piece.is_empty() {
        writeln!(out, "- **4pc:** {}", four_piece.join(", "))?;
    }
    let two_piece = served_names(config, false);
    if !two_piece.is_empty() {
        writeln!(out, "- **2pc:** {}", two_piece.join(", "))?;
    }
    writeln!(out)?;

    writeln!(out, "| Slot | Main Stat | Sub Stats | Chance |")?;
    writeln!(out, "|------|-----------|-----------|--------|")?;
    for row in slot_rows(config) {
        writeln!(
            out,
            "| {} | {} | {} [>= {}] | {} |",
            row.label, row.main, row.substats, row.min_stat_count, row.chance
        )?;
    }
    writeln!(out)
}

/// Perfect characters first, then imperfect ones marked with `^`.
fn served_names(config: &SetConfig, four_piece: bool) -> Vec<String> {
    let matching = config
        .served_characters
        .iter()
        .filter(|served| served.has_4pc_build == four_piece);

    let perfect = matching
        .clone()
        .filter(|served| served.has_perfect_merge)
        .map(|served| served.character_id.clone());
    let imperfect = matching
        .filter(|served| !served.has_perfect_merge)
        .map(|served| format!("{}^", served.character_id));

    perfect.chain(imperfect).collect()
}

struct SlotRow {
    label: &'static str,
    main: String,
    substats: SubStatSet,
    min_stat_count: u8,
    chance: String,
}

fn slot_rows(config: &SetConfig) -> Vec<SlotRow> {
    let flower_plume = &config.flower_plume;
    let details = compute_slot_chance_details(config);
    let mut rows = Vec::with_capacity(5);

    // A flat hp or atk requirement reads differently on the two pieces.
    if flower_plume.substats.intersects(SubStatSet::FLAT_HP | SubStatSet::FLAT_ATK) {
        for (label, main) in [("F", MainStat::FlatHp), ("P", MainStat::FlatAtk)] {
            let (substats, min_stat_count) = shown_requirement(flower_plume, Some(main));
            rows.push(SlotRow {
                label,
                main: "---".into(),
                substats,
                min_stat_count,
                chance: format_percent(compute_fixed_main_chance(main, flower_plume)),
            });
        }
    } else {
        rows.push(SlotRow {
            label: "F/P",
            main: "---".into(),
            substats: flower_plume.substats,
            min_stat_count: flower_plume.min_stat_count,
            chance: format_detail(&details.flower_plume, 0),
        });
    }

    for (label, kind) in [("S", SlotKind::Sands), ("G", SlotKind::Goblet), ("C", SlotKind::Circlet)] {
        let slot = config.slot(kind);
        let (substats, min_stat_count) = shown_requirement(slot, single_main_stat(slot));
        rows.push(SlotRow {
            label,
            main: main_stat_label(&slot.main_stats),
            substats,
            min_stat_count,
            chance: format_detail(details.get(kind), slot.min_stat_count - min_stat_count),
        });
    }

    rows
}

fn single_main_stat(slot: &SlotConfig) -> Option<MainStat> {
    match slot.main_stats.as_slice() {
        [MainStatChoice::Stat(stat)] => Some(*stat),
        _ => None,
    }
}

/// Pool and count as shown to the player.
///
/// A fixed main stat that is also in the pool always counts, so it is left
/// out and the count drops by one.
fn shown_requirement(slot: &SlotConfig, main: Option<MainStat>) -> (SubStatSet, u8) {
    match main.and_then(MainStat::as_substat) {
        Some(overlap) if slot.substats.has(overlap) => (
            slot.substats.without(overlap),
            slot.min_stat_count.saturating_sub(1),
        ),
        _ => (slot.substats, slot.min_stat_count),
    }
}

fn main_stat_label(choices: &[MainStatChoice]) -> String {
    if choices.is_empty() {
        return "Any".into();
    }
    choices.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn format_detail(detail: &SlotChanceDetail, hidden: u8) -> String {
    match detail.tightened {
        Some(tightened) => format!(
            "{} ({} at >= {})",
            format_percent(detail.base),
            format_percent(tightened.chance),
            tightened.min_stat_count.saturating_sub(hidden)
        ),
        None => format_percent(detail.base),
    }
}

// ============================================================================
// Builds appendix
// ============================================================================

fn write_builds_appendix(out: &mut String, groups: &[BuildGroup]) -> fmt::Result {
    writeln!(out, "---")?;
    writeln!(out)?;
    writeln!(out, "# Appendix: Character Builds")?;
    writeln!(out)?;

    for group in groups.iter().filter(|group| !group.hidden) {
        writeln!(out, "## {}", group.character_id)?;
        writeln!(out)?;
        for build in group.builds.iter().filter(|build| build.visible) {
            writeln!(out, "  - {}", build_line(build))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn build_line(build: &Build) -> String {
    let name = if build.name.is_empty() { &build.id } else { &build.name };
    let sets = match &build.composition {
        Composition::FourPiece { artifact_set } => format!("**Set:** {}", artifact_set),
        Composition::TwoPlusTwo {
            first_set,
            second_set,
        } => format!("**Sets:** {} + {}", first_set, second_set),
    };

    let mut line = format!(
        "{}: {} | S: {} | G: {} | C: {} | Sub: {}",
        name,
        sets,
        compact_main_stats(&build.sands),
        compact_main_stats(&build.goblet),
        compact_main_stats(&build.circlet),
        build.substats.to_string().replace(", ", ",")
    );
    if let Some(k) = build.k_override {
        let _ = write!(line, " _(k={})_", k);
    }
    line
}

fn compact_main_stats(choices: &[MainStatChoice]) -> String {
    if choices.is_empty() {
        return "Any".into();
    }
    choices.iter().map(ToString::to_string).collect::<Vec<_>>().join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use filter_core::{FilterKey, ServedCharacter, SubStat};

    fn config() -> SetConfig {
        let crits = SubStatSet::CRITS;
        let pool = crits.with(SubStat::AtkPercent).with(SubStat::EnergyRecharge);
        SetConfig::from_slots(
            [
                SlotConfig::new(pool, crits, 2),
                SlotConfig::new(pool, crits, 2).with_main_stats([MainStat::AtkPercent.into()]),
                SlotConfig::new(pool, crits, 2).with_main_stats([MainStat::PyroDmg.into()]),
                SlotConfig::new(pool, SubStatSet::empty(), 2)
                    .with_main_stats([MainStat::CritRate.into(), MainStat::CritDamage.into()]),
            ],
            vec![
                ServedCharacter::new("xiangling", true, true),
                ServedCharacter::new("bennett", false, true),
                ServedCharacter::new("xingqiu", true, false),
            ],
        )
    }

    fn rules() -> Vec<FilterGroup> {
        let mut group = FilterGroup::new(FilterKey::Set("emblem_of_severed_fate".into()));
        group.configurations.push(config());
        vec![group]
    }

    #[test]
    fn renders_heading_and_served_characters() {
        let report = render_markdown(&rules(), None);
        assert!(report.starts_with("# Artifact Filter Configurations\n"));
        assert!(report.contains("## emblem_of_severed_fate\n"));
        assert!(report.contains("### Configuration 1\n"));
        assert!(report.contains("- **4pc:** xiangling, bennett^\n"));
        assert!(report.contains("- **2pc:** xingqiu\n"));
        assert!(!report.contains("Appendix"));
    }

    #[test]
    fn single_main_stat_in_pool_is_shown_as_counted() {
        let report = render_markdown(&rules(), None);
        assert!(report.contains("| S | atk% | cr, cd, er [>= 1] |"));
        assert!(report.contains("| G | pyro% | cr, cd, atk%, er [>= 2] |"));
        assert!(report.contains("| C | cr, cd | cr, cd, atk%, er [>= 2] |"));
        assert!(report.contains("| F/P | --- | cr, cd, atk%, er [>= 2] |"));
    }

    #[test]
    fn flat_stats_split_flower_and_plume() {
        let mut config = config();
        config.flower_plume = SlotConfig::new(SubStatSet::FLAT_HP.with(SubStat::CritRate), SubStatSet::empty(), 2);
        let mut group = FilterGroup::new(FilterKey::pair("a", "b"));
        group.configurations.push(config);

        let report = render_markdown(&[group], None);
        assert!(report.contains("## a+b\n"));
        assert!(report.contains("| F | --- | cr [>= 1] |"));
        assert!(report.contains("| P | --- | cr, hp [>= 2] |"));
        assert!(!report.contains("F/P"));
    }

    #[test]
    fn empty_main_stats_read_any() {
        let mut config = config();
        config.sands = SlotConfig::unconstrained();
        let mut group = FilterGroup::new(FilterKey::Set("x".into()));
        group.configurations.push(config);

        let report = render_markdown(&[group], None);
        assert!(report.contains("| S | Any |  [>= 0] | 100.00% |"));
    }

    #[test]
    fn appendix_lists_visible_builds() {
        let builds = vec![
            BuildGroup::new(
                "xiangling",
                vec![
                    Build::four_piece("emblem", "emblem_of_severed_fate", SubStatSet::CRITS)
                        .with_name("Burst")
                        .with_sands([MainStat::EnergyRecharge.into()])
                        .with_min_stat_count(1),
                    Build::two_plus_two("hidden", "a", "b", SubStatSet::CRITS).with_visible(false),
                ],
            ),
            BuildGroup::new("bennett", Vec::new()).hidden(),
        ];

        let report = render_markdown(&rules(), Some(&builds));
        assert!(report.contains("# Appendix: Character Builds\n"));
        assert!(report.contains(
            "  - Burst: **Set:** emblem_of_severed_fate | S: er | G: Any | C: Any | Sub: cr,cd _(k=1)_\n"
        ));
        assert!(!report.contains("hidden"));
        assert!(!report.contains("## bennett"));
    }

    #[test]
    fn percent_has_two_decimals() {
        assert_eq!(format_percent(0.5), "50.00%");
        assert_eq!(format_percent(1.0 / 3.0), "33.33%");
    }
}

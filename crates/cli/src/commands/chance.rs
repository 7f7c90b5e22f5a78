//! Estimate pass chances of a single slot rule

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use filter_core::{
    SlotChanceDetail, SlotConfig, SlotKind, SubStatSet, compute_slot_chance_detail,
    parse_main_stat_list, parse_substat_list,
};

use crate::report::format_percent;

/// Estimate how often a random item passes one slot rule
#[derive(Parser)]
pub struct Chance {
    /// Slot to roll (flowerPlume, sands, goblet, circlet)
    #[arg(short, long, value_name = "SLOT")]
    slot: String,

    /// Accepted main stats, comma separated (e.g. "atk%,er"); any when omitted
    #[arg(short, long, value_name = "STATS")]
    main: Option<String>,

    /// Acceptable secondary stats, comma separated (e.g. "cr,cd,atk%,er")
    #[arg(long, value_name = "STATS")]
    substats: String,

    /// Mandatory secondary stats, comma separated
    #[arg(long, value_name = "STATS")]
    must: Option<String>,

    /// Minimum number of acceptable stats; defaults to the mandatory count
    #[arg(short = 'k', long, value_name = "COUNT")]
    min: Option<u8>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl Chance {
    pub fn execute(self) -> Result<()> {
        let (slot, config) = self.rule()?;
        let detail = compute_slot_chance_detail(slot, &config);

        if self.json {
            let json = serde_json::to_string_pretty(&detail)
                .context("Failed to serialize chance to JSON")?;
            println!("{}", json);
        } else {
            print_detail(slot, &config, &detail);
        }
        Ok(())
    }

    fn rule(&self) -> Result<(SlotKind, SlotConfig)> {
        let slot = SlotKind::from_identifier(&self.slot)?;
        let substats = parse_substat_list(&self.substats)?;
        let must_present = match &self.must {
            Some(raw) => parse_substat_list(raw)?,
            None => SubStatSet::empty(),
        };
        let min_stat_count = match self.min {
            Some(count) => count,
            None => u8::try_from(must_present.len()).context("Too many mandatory stats")?,
        };

        let mut config = SlotConfig::new(substats, must_present, min_stat_count);
        if let Some(raw) = &self.main {
            config = config.with_main_stats(parse_main_stat_list(raw)?);
        }

        config
            .validate(slot)
            .with_context(|| format!("Invalid rule for slot {}", slot))?;
        Ok((slot, config))
    }
}

fn print_detail(slot: SlotKind, config: &SlotConfig, detail: &SlotChanceDetail) {
    println!("{} {}", style("Slot:").bold().cyan(), slot);
    if !config.main_stats.is_empty() {
        let mains: Vec<String> = config.main_stats.iter().map(ToString::to_string).collect();
        println!("{} {}", style("Main Stat:").bold().cyan(), mains.join(", "));
    }
    println!(
        "{} {} [>= {}]",
        style("Sub Stats:").bold().cyan(),
        config.substats,
        config.min_stat_count
    );
    if !config.must_present.is_empty() {
        println!("{} {}", style("Must Have:").bold().cyan(), config.must_present);
    }
    println!();
    println!("{} {}", style("Chance:").bold().green(), format_percent(detail.base));
    if let Some(tightened) = detail.tightened {
        println!(
            "{} {}",
            style(format!("At >= {}:", tightened.min_stat_count)).bold().yellow(),
            format_percent(tightened.chance)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filter_core::{MainStat, MainStatChoice, SubStat};

    fn parse(args: &[&str]) -> Chance {
        let mut argv = vec!["chance"];
        argv.extend_from_slice(args);
        Chance::try_parse_from(argv).unwrap()
    }

    #[test]
    fn builds_rule_from_arguments() {
        let cmd = parse(&[
            "--slot", "sands", "--main", "atk%, er", "--substats", "cr,cd,em", "--must", "cr", "-k", "2",
        ]);
        let (slot, config) = cmd.rule().unwrap();

        assert_eq!(slot, SlotKind::Sands);
        assert_eq!(
            config.main_stats,
            vec![
                MainStatChoice::Stat(MainStat::AtkPercent),
                MainStatChoice::Stat(MainStat::EnergyRecharge)
            ]
        );
        assert_eq!(config.must_present, SubStatSet::from(SubStat::CritRate));
        assert_eq!(config.min_stat_count, 2);
    }

    #[test]
    fn count_defaults_to_mandatory_stats() {
        let cmd = parse(&["--slot", "circlet", "--substats", "cr,cd,atk%", "--must", "cr,cd"]);
        let (_, config) = cmd.rule().unwrap();
        assert_eq!(config.min_stat_count, 2);
    }

    #[test]
    fn invalid_rule_is_rejected() {
        let outside = parse(&["--slot", "goblet", "--substats", "cr", "--must", "cd"]);
        assert!(outside.rule().is_err());

        let flower_main = parse(&["--slot", "flowerPlume", "--main", "hp", "--substats", "cr"]);
        assert!(flower_main.rule().is_err());

        let unknown_slot = parse(&["--slot", "boots", "--substats", "cr"]);
        assert!(unknown_slot.rule().is_err());
    }
}

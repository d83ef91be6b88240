// SPDX-License-Identifier: Apache-2.0

use console::style;
use std::io::{self, Write};

use moderator_core::RepoClass;

use super::Renderable;
use super::common::write_list;
use crate::cli::OutputContext;
use crate::commands::types::PolicyResult;

fn class_label(class: RepoClass) -> &'static str {
    match class {
        RepoClass::Plugin => "plugin",
        RepoClass::Flagship => "flagship",
        RepoClass::Companion => "companion",
    }
}

impl Renderable for PolicyResult {
    fn render_text(&self, w: &mut dyn Write, ctx: &OutputContext) -> io::Result<()> {
        let policy = &self.policy;
        writeln!(w, "{}", style("Moderation Policy").bold().green())?;
        writeln!(w, "{}", style("=".repeat(17)).dim())?;
        writeln!(w, "  {:<15} {}", style("product:").dim(), policy.product_name())?;
        writeln!(w, "  {:<15} v{}", style("min version:").dim(), policy.min_version())?;
        writeln!(
            w,
            "  {:<15} {:.0}%",
            style("CJK threshold:").dim(),
            policy.cjk_ratio_threshold() * 100.0
        )?;
        writeln!(w, "  {:<15} {}", style("config:").dim(), self.config_path)?;
        writeln!(w)?;

        let plugin: Vec<String> = policy.plugin_repos().iter().cloned().collect();
        let companion: Vec<String> = policy.companion_repos().iter().cloned().collect();
        write_list(w, "Plugin repositories", &plugin, "none")?;
        write_list(
            w,
            "Flagship repository",
            &[policy.flagship_repo().to_string()],
            "none",
        )?;
        write_list(w, "Companion repositories", &companion, "none")?;
        writeln!(w)?;

        writeln!(w, "  {}", style("Rule order").cyan().bold())?;
        for table in &self.rule_tables {
            writeln!(
                w,
                "    {:<10} {}",
                class_label(table.class),
                table.rules.join(" > ")
            )?;
        }

        if ctx.verbose {
            let links = policy.links();
            writeln!(w)?;
            writeln!(w, "  {}", style("Comment links").cyan().bold())?;
            for (name, url) in [
                ("forum", &links.forum),
                ("discord", &links.discord),
                ("bug template", &links.bug_template),
                ("conduct", &links.code_of_conduct),
                ("contributing", &links.contributing),
            ] {
                writeln!(w, "    {name:<13} {url}")?;
            }
        }
        Ok(())
    }
}

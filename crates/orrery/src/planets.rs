// SPDX-FileCopyrightText: 2026 Orrery Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `orrery planets`, `orrery deleted`, and `orrery change-log` commands.

use clap::{Args, Subcommand};
use orrery_client::CatalogueClient;
use orrery_core::query::Range;
use orrery_core::types::{
    ChangeLogEntry, DeletedPlanetRow, PlanetCreate, PlanetRecord, PlanetUpdate,
};
use orrery_core::{OrreryError, PlanetQuery, SortBy, SortOrder};

use crate::activity::display_time;
use crate::output::{number, opt, Output};

#[derive(Subcommand, Debug)]
pub enum PlanetsCommand {
    /// List planets with filters and sorting.
    List(ListArgs),
    /// Show one planet by id or name.
    Get {
        /// Planet id.
        id: Option<i64>,
        /// Look up by name instead (case-insensitive).
        #[arg(long, conflicts_with = "id")]
        name: Option<String>,
    },
    /// Create a planet.
    Create(PlanetFields),
    /// Change fields of a planet.
    Patch {
        id: i64,
        #[command(flatten)]
        fields: PlanetFields,
    },
    /// Soft-delete a planet (admin).
    Delete { id: i64 },
    /// Restore a soft-deleted planet (admin).
    Restore { id: i64 },
    /// Permanently remove a planet (admin).
    HardDelete {
        id: i64,
        #[arg(long)]
        confirm: bool,
    },
    /// Remove every planet (admin).
    Wipe {
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive name substring.
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "method")]
    pub disc_method: Option<String>,
    #[arg(long)]
    pub min_year: Option<i32>,
    #[arg(long)]
    pub max_year: Option<i32>,
    #[arg(long)]
    pub min_orbperd: Option<f64>,
    #[arg(long)]
    pub max_orbperd: Option<f64>,
    #[arg(long)]
    pub min_rade: Option<f64>,
    #[arg(long)]
    pub max_rade: Option<f64>,
    #[arg(long)]
    pub min_masse: Option<f64>,
    #[arg(long)]
    pub max_masse: Option<f64>,
    #[arg(long)]
    pub min_st_teff: Option<f64>,
    #[arg(long)]
    pub max_st_teff: Option<f64>,
    #[arg(long)]
    pub min_st_rad: Option<f64>,
    #[arg(long)]
    pub max_st_rad: Option<f64>,
    #[arg(long)]
    pub min_st_mass: Option<f64>,
    #[arg(long)]
    pub max_st_mass: Option<f64>,
    #[arg(long)]
    pub include_deleted: bool,
    /// Column to sort by (e.g. name, disc_year, created_at).
    #[arg(long)]
    pub sort_by: Option<SortBy>,
    /// asc or desc.
    #[arg(long)]
    pub sort_order: Option<SortOrder>,
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
}

impl ListArgs {
    pub fn to_query(&self) -> PlanetQuery {
        PlanetQuery {
            limit: Some(self.limit),
            offset: Some(self.offset),
            name: self.name.clone(),
            disc_method: self.disc_method.clone(),
            year: Range::new(self.min_year, self.max_year),
            orbperd: Range::new(self.min_orbperd, self.max_orbperd),
            rade: Range::new(self.min_rade, self.max_rade),
            masse: Range::new(self.min_masse, self.max_masse),
            st_teff: Range::new(self.min_st_teff, self.max_st_teff),
            st_rad: Range::new(self.min_st_rad, self.max_st_rad),
            st_mass: Range::new(self.min_st_mass, self.max_st_mass),
            include_deleted: self.include_deleted.then_some(true),
            sort_by: self.sort_by,
            sort_order: self.sort_order,
        }
    }
}

/// Editable planet fields.
#[derive(Args, Debug, Default, Clone)]
pub struct PlanetFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "method")]
    pub disc_method: Option<String>,
    #[arg(long = "year")]
    pub disc_year: Option<i32>,
    /// Orbital period in days.
    #[arg(long)]
    pub orbperd: Option<f64>,
    /// Radius in Earth radii.
    #[arg(long)]
    pub rade: Option<f64>,
    /// Mass in Earth masses.
    #[arg(long)]
    pub masse: Option<f64>,
    /// Stellar effective temperature in K.
    #[arg(long)]
    pub st_teff: Option<f64>,
    #[arg(long)]
    pub st_rad: Option<f64>,
    #[arg(long)]
    pub st_mass: Option<f64>,
}

impl PlanetFields {
    pub fn into_create(self) -> Result<PlanetCreate, OrreryError> {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| OrreryError::InvalidArgument("--name is required".into()))?;
        Ok(PlanetCreate {
            name,
            disc_method: self.disc_method,
            disc_year: self.disc_year,
            orbperd: self.orbperd,
            rade: self.rade,
            masse: self.masse,
            st_teff: self.st_teff,
            st_rad: self.st_rad,
            st_mass: self.st_mass,
        })
    }

    pub fn into_update(self) -> PlanetUpdate {
        PlanetUpdate {
            name: self.name,
            disc_method: self.disc_method,
            disc_year: self.disc_year,
            orbperd: self.orbperd,
            rade: self.rade,
            masse: self.masse,
            st_teff: self.st_teff,
            st_rad: self.st_rad,
            st_mass: self.st_mass,
        }
    }
}

fn require_confirm(confirm: bool, what: &str) -> Result<(), OrreryError> {
    if confirm {
        Ok(())
    } else {
        Err(OrreryError::InvalidArgument(format!(
            "refusing to {what} without --confirm"
        )))
    }
}

pub async fn run_planets(
    client: &CatalogueClient,
    command: PlanetsCommand,
    out: Output,
) -> Result<(), OrreryError> {
    match command {
        PlanetsCommand::List(args) => {
            let page = client.list_planets(&args.to_query()).await?;
            if out.json {
                return out.print_json(&page);
            }
            out.heading(&format!(
                "Planets {}-{} of {}",
                page.offset + u64::from(!page.items.is_empty()),
                page.offset + page.items.len() as u64,
                page.total
            ));
            print_planet_table(&page.items, out);
            Ok(())
        }
        PlanetsCommand::Get { id, name } => {
            let planet = match (id, name) {
                (_, Some(name)) => client.planet_by_name(&name).await?,
                (Some(id), None) => client.planet_by_id(id).await?,
                (None, None) => {
                    return Err(OrreryError::InvalidArgument(
                        "pass a planet id or --name".into(),
                    ));
                }
            };
            show_planet(&planet, out)
        }
        PlanetsCommand::Create(fields) => {
            let planet = client.create_planet(&fields.into_create()?).await?;
            show_planet(&planet, out)
        }
        PlanetsCommand::Patch { id, fields } => {
            let planet = client.patch_planet(id, &fields.into_update()).await?;
            show_planet(&planet, out)
        }
        PlanetsCommand::Delete { id } => {
            client.soft_delete_planet(id).await?;
            report_done(out, &format!("planet #{id} soft-deleted"))
        }
        PlanetsCommand::Restore { id } => {
            let restored = client.restore_planet(id).await?;
            if out.json {
                return out.print_json(&restored);
            }
            out.done(&restored.message);
            Ok(())
        }
        PlanetsCommand::HardDelete { id, confirm } => {
            require_confirm(confirm, "permanently delete a planet")?;
            client.hard_delete_planet(id).await?;
            report_done(out, &format!("planet #{id} permanently deleted"))
        }
        PlanetsCommand::Wipe { confirm } => {
            require_confirm(confirm, "delete every planet")?;
            client.wipe_planets().await?;
            report_done(out, "catalogue wiped")
        }
    }
}

fn report_done(out: Output, message: &str) -> Result<(), OrreryError> {
    if out.json {
        return out.print_json(&serde_json::json!({ "ok": true, "message": message }));
    }
    out.done(message);
    Ok(())
}

fn show_planet(planet: &PlanetRecord, out: Output) -> Result<(), OrreryError> {
    if out.json {
        return out.print_json(planet);
    }
    out.heading(&format!("{} (#{})", planet.name, planet.id));
    let rows = [
        ("Discovery Method", opt(planet.disc_method.as_deref())),
        ("Discovery Year", opt(planet.disc_year)),
        ("Orbital Period", number(planet.orbperd)),
        ("Radius (R_earth)", number(planet.rade)),
        ("Mass (M_earth)", number(planet.masse)),
        ("Star T_eff", number(planet.st_teff)),
        ("Star Radius", number(planet.st_rad)),
        ("Star Mass", number(planet.st_mass)),
        ("Created", opt(planet.created_at.as_deref().map(display_time))),
        ("Updated", opt(planet.updated_at.as_deref().map(display_time))),
    ];
    for (label, value) in rows {
        println!("    {label:<18} {value}");
    }
    if planet.is_deleted {
        println!("    {}", out.fail("deleted"));
    }
    if !planet.changes.is_empty() {
        println!();
        for change in &planet.changes {
            println!(
                "    {}: {} → {}",
                orrery_core::fields::field_label(&change.field),
                change.before,
                change.after
            );
        }
    }
    println!();
    Ok(())
}

fn print_planet_table(planets: &[PlanetRecord], out: Output) {
    if planets.is_empty() {
        println!("    {}", out.dim("No planets match."));
        println!();
        return;
    }
    println!(
        "    {:>6}  {:<24} {:<22} {:>5} {:>10} {:>8} {:>8}",
        "id", "name", "method", "year", "period", "radius", "mass"
    );
    for p in planets {
        println!(
            "    {:>6}  {:<24} {:<22} {:>5} {:>10} {:>8} {:>8}",
            p.id,
            truncate(&p.name, 24),
            truncate(p.disc_method.as_deref().unwrap_or("—"), 22),
            opt(p.disc_year),
            number(p.orbperd),
            number(p.rade),
            number(p.masse)
        );
    }
    println!();
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

pub async fn run_deleted(
    client: &CatalogueClient,
    limit: usize,
    offset: usize,
    out: Output,
) -> Result<(), OrreryError> {
    let rows = client.list_deleted_planets(limit, offset).await?;
    if out.json {
        return out.print_json(&rows);
    }
    out.heading("Soft-deleted planets");
    print_deleted_table(&rows, out);
    Ok(())
}

fn print_deleted_table(rows: &[DeletedPlanetRow], out: Output) {
    if rows.is_empty() {
        println!("    {}", out.dim("Nothing deleted."));
    }
    for row in rows {
        println!(
            "    {:>6}  {:<24} {:<22} {:>5}  {}",
            row.id,
            truncate(&row.name, 24),
            truncate(row.disc_method.as_deref().unwrap_or("—"), 22),
            opt(row.disc_year),
            opt(row.deleted_at.as_deref().map(display_time))
        );
    }
    println!();
}

pub async fn run_change_log(
    client: &CatalogueClient,
    limit: usize,
    offset: usize,
    out: Output,
) -> Result<(), OrreryError> {
    let rows = client.change_logs(limit, offset).await?;
    if out.json {
        return out.print_json(&rows);
    }
    out.heading("Change log");
    print_change_log(&rows, out);
    Ok(())
}

fn print_change_log(rows: &[ChangeLogEntry], out: Output) {
    if rows.is_empty() {
        println!("    {}", out.dim("No change-log rows."));
    }
    for row in rows {
        let name = row
            .planet_name
            .clone()
            .unwrap_or_else(|| format!("Planet #{}", row.planet_id));
        println!(
            "    {}  {:<7} {} (#{})",
            display_time(&row.created_at),
            row.action.to_string(),
            name,
            row.planet_id
        );
        for change in &row.changes {
            println!(
                "        {}: {} → {}",
                orrery_core::fields::field_label(&change.field),
                change.before,
                change.after
            );
        }
    }
    println!();
}

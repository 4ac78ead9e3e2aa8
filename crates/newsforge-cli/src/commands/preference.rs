use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use newsforge_core::config::AiServicePreference;
use newsforge_core::geolocation::{LOCATION_TTL_HOURS, UserLocation};
use newsforge_core::settings::SettingsService;
use newsforge_infrastructure::PreferenceKey;
use serde_json::Value;
use strum::IntoEnumIterator;

use super::AppContext;
use super::utils::write_json;

fn parse_key(key: &str) -> Result<PreferenceKey> {
    PreferenceKey::from_str(key).map_err(|_| {
        let known: Vec<String> = PreferenceKey::iter().map(|k| k.to_string()).collect();
        anyhow!("Unknown preference key '{}'. Known keys: {}", key, known.join(", "))
    })
}

pub fn get(ctx: &AppContext, key: &str) -> Result<()> {
    let key = parse_key(key)?;
    let value: Option<Value> = ctx.settings_service.preferences().get(key)?;
    write_json(&value, None)
}

pub fn set(ctx: &AppContext, key: &str, raw: &str) -> Result<()> {
    let key = parse_key(key)?;
    let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    ctx.settings_service
        .preferences()
        .set(key, &value)
        .with_context(|| format!("Failed to store {key}"))?;
    println!("✓ Saved {key}");
    Ok(())
}

pub fn remove(ctx: &AppContext, key: &str) -> Result<()> {
    let key = parse_key(key)?;
    if ctx.settings_service.preferences().remove(key)? {
        println!("✓ Removed {key}");
    } else {
        println!("{key} was not set");
    }
    Ok(())
}

/// Unrecognized values are stored as `default`, matching how they read back.
pub async fn service(ctx: &AppContext, raw: &str) -> Result<()> {
    let preference = AiServicePreference::parse_lossy(raw);
    if preference.as_ref() != raw {
        eprintln!("'{raw}' is not a known AI service, using '{preference}'");
    }
    ctx.settings_service.save_preference(preference).await?;
    println!("✓ AI service set to {preference}");
    Ok(())
}

pub fn show_location(ctx: &AppContext) -> Result<()> {
    match ctx.settings_service.preferences().user_location(Utc::now())? {
        Some(location) => write_json(&location, None),
        None => {
            println!("No location cached (entries expire after {LOCATION_TTL_HOURS}h)");
            Ok(())
        }
    }
}

pub fn set_location(
    ctx: &AppContext,
    latitude: f64,
    longitude: f64,
    city: Option<String>,
    country: Option<String>,
) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(anyhow!("Coordinates out of range: {latitude}, {longitude}"));
    }
    let mut location = UserLocation::new(latitude, longitude);
    location.city = city;
    location.country = country;
    ctx.settings_service
        .preferences()
        .set_user_location(&location)
        .context("Failed to store location")?;
    println!("✓ Location saved");
    Ok(())
}

// src/bin/seed.rs
// Creates the demo projects shown by the studio client through the HTTP API.
use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::env;
use std::process;
use std::time::{Duration, Instant};

// --- ANSI colours ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

// --- Data ---

#[derive(Serialize)]
struct PhotoPayload {
    url: String,
    name: String,
    #[serde(rename = "type")]
    type_: String,
}

struct DemoProject {
    name: &'static str,
    layout: &'static str,
    filter: Option<&'static str>,
    customization: Value,
    photos: &'static [&'static str],
}

#[derive(Deserialize, Debug)]
struct CreatedProject {
    id: String,
    #[serde(default)]
    photos: Vec<Value>,
}

#[derive(Debug)]
struct SeedResult {
    name: String,
    success: bool,
    id: Option<String>,
    photos: usize,
    duration_secs: f64,
}

const PORTRAITS: &[&str] = &[
    "https://images.unsplash.com/photo-1494790108755-2616c525ecb9?w=400&h=400&fit=crop&crop=face",
    "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=400&h=400&fit=crop&crop=face",
    "https://images.unsplash.com/photo-1438761681033-6461ffad8d80?w=400&h=400&fit=crop&crop=face",
    "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=400&h=400&fit=crop&crop=face",
];

const PARTY: &[&str] = &[
    "https://images.unsplash.com/photo-1464207687429-7505649dae38?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1530103862676-de8c9debad1d?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1464207687429-7505649dae38?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1530103862676-de8c9debad1d?w=400&h=400&fit=crop",
];

const WEDDING: &[&str] = &[
    "https://images.unsplash.com/photo-1519741497674-611481863552?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1606216794074-735e91aa2c92?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1519741497674-611481863552?w=400&h=400&fit=crop",
    "https://images.unsplash.com/photo-1606216794074-735e91aa2c92?w=400&h=400&fit=crop",
];

fn demo_projects() -> Vec<DemoProject> {
    vec![
        DemoProject {
            name: "Birthday Party Fun",
            layout: "strip-4",
            filter: Some("vintage-1"),
            customization: json!({
                "border_color": "#ffffff",
                "background_color": "#ffffff",
                "spacing": 10,
                "text": "Birthday Celebration 2025",
                "text_color": "#000000"
            }),
            photos: PARTY,
        },
        DemoProject {
            name: "Wedding Memories",
            layout: "grid-2x2",
            filter: Some("cinematic-1"),
            customization: json!({
                "border_color": "#f8f8f8",
                "background_color": "#ffffff",
                "spacing": 15,
                "text": "Sarah & John • June 2025",
                "text_color": "#333333"
            }),
            photos: WEDDING,
        },
        DemoProject {
            name: "Portrait Session",
            layout: "grid-2x2",
            filter: None,
            customization: json!({}),
            photos: PORTRAITS,
        },
    ]
}

fn photo_payloads(urls: &[&str]) -> Vec<PhotoPayload> {
    urls.iter()
        .enumerate()
        .map(|(i, url)| PhotoPayload {
            url: url.to_string(),
            name: format!("Photo {}", i + 1),
            type_: "image/jpeg".to_string(),
        })
        .collect()
}

// --- Seeder ---

struct ProjectSeeder {
    base_url: String,
    client: Client,
    results: Vec<SeedResult>,
}

impl ProjectSeeder {
    fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            client,
            results: Vec::new(),
        })
    }

    async fn check_service_health(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn create_project(&self, demo: &DemoProject) -> Result<CreatedProject> {
        let payload = json!({
            "name": demo.name,
            "layout": demo.layout,
            "filter": demo.filter,
            "customization": demo.customization,
            "photos": photo_payloads(demo.photos),
        });

        let response = self
            .client
            .post(format!("{}/api/projects", self.base_url))
            .json(&payload)
            .send()
            .await
            .context("request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            bail!("HTTP {} - {}", status, body);
        }

        response
            .json::<CreatedProject>()
            .await
            .context("Failed to parse response JSON")
    }

    async fn run(&mut self) {
        println!("\n{}🔍 Checking service status...{}", CYAN, RESET);
        if !self.check_service_health().await {
            println!("{}❌ Service unavailable at {}.{}", RED, self.base_url, RESET);
            println!("{}Please ensure snapstyle-projects is running (cargo run){}", YELLOW, RESET);
            process::exit(1);
        }
        println!("{}✅ Service available{}\n", GREEN, RESET);

        let demos = demo_projects();
        let total = demos.len();

        for (i, demo) in demos.iter().enumerate() {
            let start_time = Instant::now();
            println!("{}[{}/{}] Creating '{}'...{}", CYAN, i + 1, total, demo.name, RESET);

            let outcome = self.create_project(demo).await;
            let duration = start_time.elapsed().as_secs_f64();

            match outcome {
                Ok(created) => {
                    println!(
                        "{}✅ {} ({} photos, {:.2}s){}",
                        GREEN,
                        created.id,
                        created.photos.len(),
                        duration,
                        RESET
                    );
                    self.results.push(SeedResult {
                        name: demo.name.to_string(),
                        success: true,
                        id: Some(created.id),
                        photos: created.photos.len(),
                        duration_secs: duration,
                    });
                }
                Err(err) => {
                    println!("{}❌ Error creating {}: {:#}{}", RED, demo.name, err, RESET);
                    self.results.push(SeedResult {
                        name: demo.name.to_string(),
                        success: false,
                        id: None,
                        photos: 0,
                        duration_secs: duration,
                    });
                }
            }
        }

        self.print_summary();
    }

    fn print_summary(&self) {
        println!("\n{}📋 Seed Summary{}", BOLD, RESET);
        println!("──────────────────────────────────────────────────────────────────────────");
        println!("{:<24} {:<8} {:<38} {:>7}", "Project", "Status", "Id", "Photos");
        println!("──────────────────────────────────────────────────────────────────────────");

        for res in &self.results {
            let status_icon = if res.success { "✅" } else { "❌" };
            println!(
                "{:<24} {:<8} {:<38} {:>7}",
                res.name,
                status_icon,
                res.id.as_deref().unwrap_or("-"),
                res.photos
            );
        }

        let created = self.results.iter().filter(|r| r.success).count();
        let total_duration: f64 = self.results.iter().map(|r| r.duration_secs).sum();
        println!("──────────────────────────────────────────────────────────────────────────");
        println!(
            "\n{}✨ {} of {} projects created in {:.2}s{}",
            BOLD,
            created,
            self.results.len(),
            total_duration,
            RESET
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let base_url =
        env::var("PROJECTS_API_URL").unwrap_or_else(|_| "http://localhost:8001".to_string());

    let mut seeder = ProjectSeeder::new(base_url.trim_end_matches('/').to_string())?;
    seeder.run().await;
    Ok(())
}

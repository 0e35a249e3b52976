//! Freightline CLI binary

use anyhow::Context;
use clap::Parser;
use freightline::cli::{Cli, Commands, FreightlineApp, OffersAction};
use freightline::negotiation::NegotiationOutcome;
use freightline::team::FileKind;
use freightline::types::{OfferId, OfferType, ParticipantRole, UserId};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    let app = FreightlineApp::seeded();

    match cli.command {
        Commands::Offers { action } => match action {
            OffersAction::List { offer_type } => {
                let offers = match offer_type {
                    Some(raw) => {
                        let parsed: OfferType = raw.parse().map_err(anyhow::Error::msg)?;
                        app.offers_by_type(parsed).await
                    }
                    None => app.list_offers().await,
                };

                for offer in offers {
                    println!(
                        "{}  {:<9} {:<11} {:>7} {}  {}",
                        offer.id,
                        offer.offer_type().to_string(),
                        offer.status.to_string(),
                        offer.price,
                        offer.currency,
                        offer.title
                    );
                }
            }

            OffersAction::Show { offer_id } => {
                let offer = app.offer(&OfferId(offer_id)).await?;
                println!("{}", serde_json::to_string_pretty(&offer)?);
            }

            OffersAction::Marketplaces => {
                for marketplace in app.marketplaces().await {
                    println!(
                        "{}  {}  {}",
                        marketplace.id, marketplace.name, marketplace.website
                    );
                }
            }
        },

        Commands::Suggest { offer_id } => {
            let suggestion = app.ai_suggested_rate(&OfferId(offer_id)).await?;
            println!("{}", serde_json::to_string_pretty(&suggestion)?);
        }

        Commands::Negotiate {
            offer_id,
            target,
            max,
            no_ai,
            rounds,
        } => {
            run_negotiate(&app, OfferId(offer_id), target, max, !no_ai, rounds).await?;
        }

        Commands::Demo => {
            run_demo(&app).await?;
        }
    }

    Ok(())
}

/// Open a negotiation, trade rounds with the simulated counterparty, and
/// print the resulting history. Each round splits the difference between the
/// negotiation's current rate and its walk-away rate.
async fn run_negotiate(
    app: &FreightlineApp,
    offer_id: OfferId,
    target: u64,
    max: u64,
    ai_enabled: bool,
    rounds: u32,
) -> anyhow::Result<()> {
    let negotiation = app
        .start_negotiation(&offer_id, target, max, ai_enabled)
        .await?;

    let suggestion = app.ai_suggested_rate(&offer_id).await?;
    tracing::info!(
        "Advisor suggests {} (confidence: {}): {}",
        suggestion.suggested_rate,
        suggestion.confidence,
        suggestion.reasoning
    );

    for round in 1..=rounds {
        let current = app.negotiation(&negotiation.id).await?.current_rate;
        let counter = (current + max) / 2;
        tracing::info!("Round {}: countering at {}", round, counter);
        app.add_counter_offer(&negotiation.id, counter, "Meeting you partway")
            .await?;

        if ai_enabled {
            // Leave room for the counterparty's delayed reply
            tokio::time::sleep(Duration::from_millis(2500)).await;
        }
    }

    let negotiation = app.negotiation(&negotiation.id).await?;
    println!("{}", serde_json::to_string_pretty(&negotiation)?);

    Ok(())
}

/// End-to-end walkthrough over the seed catalog: negotiate a cargo load,
/// book it, coordinate in a team space, finalize.
async fn run_demo(app: &FreightlineApp) -> anyhow::Result<()> {
    let offer = app
        .offers_by_type(OfferType::Cargo)
        .await
        .into_iter()
        .find(|o| o.is_available())
        .context("seed catalog has no available cargo offer")?;

    tracing::info!(
        "Negotiating \"{}\" listed at {} {}",
        offer.title,
        offer.price,
        offer.currency
    );

    let target = offer.price * 85 / 100;
    let max = offer.price * 95 / 100;
    let negotiation = app.start_negotiation(&offer.id, target, max, true).await?;

    let counter = (target + max) / 2;
    app.add_counter_offer(
        &negotiation.id,
        counter,
        "Can move on timing if the rate works",
    )
    .await?;
    tokio::time::sleep(Duration::from_millis(2500)).await;

    let negotiation = app
        .conclude_negotiation(&negotiation.id, NegotiationOutcome::Accepted)
        .await?;
    tracing::info!(
        "Booked at {} (listed {})",
        negotiation.current_rate,
        negotiation.initial_rate
    );

    let buyer = UserId("u-demo-buyer".to_string());
    let team = app
        .create_team(
            &offer.id,
            buyer.clone(),
            "Jordan Hale",
            ParticipantRole::Shipper,
        )
        .await?;

    app.add_team_message(
        &team.id,
        buyer.clone(),
        "Jordan Hale",
        "Sending over the rate confirmation now.",
        Vec::new(),
    )
    .await?;
    app.upload_team_file(
        &team.id,
        buyer.clone(),
        "rate-confirmation.pdf",
        FileKind::Invoice,
        88_000,
        Some("signed copy".to_string()),
    )
    .await?;
    app.send_team_invites(
        &team.id,
        &buyer,
        vec!["dispatch@example.com".to_string()],
        ParticipantRole::Broker,
        "Join the coordination space for this load",
    )
    .await?;

    let team = app
        .finalize_team(&team.id, &buyer, "Shipment delivered")
        .await?;
    tracing::info!("Team {} finalized", team.id);

    println!("{}", serde_json::to_string_pretty(&app.summary().await)?);

    Ok(())
}

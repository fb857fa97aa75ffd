//! Client command dispatch
//!
//! Every command maps onto one match operation. Effects reach the screens
//! through the broadcast channel, so nothing is returned on success.

use crate::game::GameResult;
use crate::protocol::ClientMessage;
use crate::state::AppState;
use std::sync::Arc;

pub async fn handle_message(msg: ClientMessage, state: &Arc<AppState>) -> GameResult<()> {
    match msg {
        ClientMessage::SelectCategory { category } => {
            tracing::info!("Selecting category: {}", category);
            state.select_category(category).await
        }

        ClientMessage::StartRound => {
            tracing::info!("Starting round");
            state.start_round().await
        }

        ClientMessage::GotIt => state.got_it().await,

        ClientMessage::SkipWord => state.skip_word().await,

        ClientMessage::ResetGame => {
            tracing::info!("Resetting game");
            state.reset().await;
            Ok(())
        }
    }
}

//! Saved list command handler

use crate::screen::ViewEvent;
use crate::state::SharedState;

pub async fn cmd_saved(state: &SharedState) -> anyhow::Result<()> {
    let screen = state.saved_movies_screen();
    screen.handle(ViewEvent::FocusGained).await;
    println!("{}", screen.render());
    Ok(())
}

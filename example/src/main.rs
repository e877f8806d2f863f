//! Walks two components through a full host lifecycle: create → start →
//! resume, background, then destroy. Run with `RUST_LOG=trace` to watch
//! every boundary crossing.

use std::{cell::RefCell, rc::Rc};

use tracing::info;
use trellis_ui::{
    Ack, Component, ContainerId, HostContext, LifecycleCoordinator, LifecycleError, SavedState,
    View, ViewRef, view_ref,
};

const CONTENT: ContainerId = ContainerId::new(1);

struct TextBlock {
    text: String,
}

impl View for TextBlock {}

/// Viewless component that only reacts to foreground changes.
struct Masthead;

impl Component for Masthead {
    fn name(&self) -> &'static str {
        "masthead"
    }

    fn on_resume(&mut self) -> Ack {
        info!("Masthead entering the foreground");
        Ack::Acknowledged
    }

    fn on_pause(&mut self) -> Ack {
        info!("Masthead leaving the foreground");
        Ack::Acknowledged
    }
}

/// Renders into the host's content container and restores its scroll
/// position from saved state.
struct ArticleList {
    scroll: u32,
}

impl Component for ArticleList {
    fn name(&self) -> &'static str {
        "article-list"
    }

    fn container_target(&self) -> Option<ContainerId> {
        Some(CONTENT)
    }

    fn build_view(&mut self) -> Option<ViewRef> {
        Some(view_ref(TextBlock {
            text: format!("article list scrolled to {}", self.scroll),
        }))
    }

    fn on_create(&mut self, saved_state: Option<&SavedState>) -> Ack {
        if let Some(scroll) = saved_state
            .and_then(|state| state.get("scroll"))
            .and_then(|raw| raw.parse().ok())
        {
            self.scroll = scroll;
            info!("Article list restored scroll position {}", self.scroll);
        }
        Ack::Acknowledged
    }

    fn on_destroy(&mut self) -> Ack {
        info!("Article list releasing its data");
        Ack::Acknowledged
    }
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("info,trellis_ui=debug") {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("info"),
        },
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> Result<(), LifecycleError> {
    init_tracing();

    let host = Rc::new(RefCell::new(HostContext::new()));
    let content = host.borrow_mut().add_container(CONTENT);

    let mut lifecycle = LifecycleCoordinator::new();
    lifecycle.attach_host(host.clone())?;

    lifecycle.attach_component(Rc::new(RefCell::new(Masthead)));
    let articles = lifecycle.attach_component(Rc::new(RefCell::new(ArticleList { scroll: 0 })));

    // The host restored instance state from its last run.
    let mut saved = SavedState::new();
    saved.put("scroll", "128");

    lifecycle.dispatch_create(Some(&saved))?;
    lifecycle.dispatch_start()?;
    lifecycle.dispatch_resume()?;

    info!(
        "Content container holds {} view(s) while resumed",
        content.borrow().len()
    );
    {
        let content_views = content.borrow();
        if let Some(first) = content_views.children().first() {
            let view = first.borrow();
            if let Some(block) = view.downcast_ref::<TextBlock>() {
                info!("First content view says: {}", block.text);
            }
        }
    }
    info!("Article list is at {:?}", lifecycle.state_of(articles));

    // The host window goes to the background, then away entirely.
    lifecycle.dispatch_pause()?;
    lifecycle.dispatch_stop()?;
    lifecycle.dispatch_destroy()?;

    info!(
        "After destroy the content container holds {} view(s)",
        content.borrow().len()
    );
    Ok(())
}

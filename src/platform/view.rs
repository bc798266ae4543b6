//! DOM view of the page state
//!
//! `apply` turns each `PageEvent` into DOM changes; `render` moves the live
//! entities every frame from their animation progress.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlButtonElement, HtmlElement};

use super::dom;
use crate::sim::{Entity, EntityId, GameEvent, GameKind, PageEvent, PageState, Particle, Removal};
use crate::{entity_offset, replay_label, shade_color};

/// Extra travel so entities leave the container completely
const OFFSCREEN_PX: f32 = 160.0;

/// Catch / pop animation length before the element is dropped
const CATCH_ANIM_MS: u64 = 260;

const PULSE_MS: u64 = 400;

/// Game and entity an input event landed on, from the `data-*` attributes
/// written at spawn time
pub fn entity_target(event: &Event) -> Option<(GameKind, EntityId)> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let el = target.closest("[data-entity-id]").ok()??;
    let kind = GameKind::from_name(&el.get_attribute("data-game")?)?;
    let id = el.get_attribute("data-entity-id")?.parse().ok()?;
    Some((kind, EntityId(id)))
}

fn class_for(kind: GameKind) -> &'static str {
    match kind {
        GameKind::Ambient => "heart-floating",
        GameKind::Hearts => "falling-heart",
        GameKind::Balloons => "balloon-el",
    }
}

pub struct PageView {
    stack: Option<HtmlElement>,
    back_btn: Option<HtmlElement>,
    yes_btn: Option<HtmlElement>,
    no_btn: Option<HtmlElement>,
    replay_btn: Option<HtmlButtonElement>,
    game_field: Option<HtmlElement>,
    balloon_overlay: Option<HtmlElement>,
    balloon_field: Option<HtmlElement>,
    rizz_counter: Option<HtmlElement>,
    paw: Option<HtmlElement>,
    entities: HashMap<(GameKind, EntityId), HtmlElement>,
    particles: HashMap<u32, HtmlElement>,
}

impl Default for PageView {
    fn default() -> Self {
        Self::new()
    }
}

impl PageView {
    pub fn new() -> Self {
        Self {
            stack: dom::by_id("stack"),
            back_btn: dom::by_id("backUpBtn"),
            yes_btn: dom::by_id("yesBtn"),
            no_btn: dom::by_id("noBtn"),
            replay_btn: dom::by_id("replayAudioBtn").and_then(|el| el.dyn_into().ok()),
            game_field: dom::by_id("gameCanvasWrap"),
            balloon_overlay: dom::by_id("balloonOverlay"),
            balloon_field: dom::by_id("balloonField"),
            rizz_counter: dom::by_id("rizzCounter"),
            paw: dom::by_id("paw"),
            entities: HashMap::new(),
            particles: HashMap::new(),
        }
    }

    /// Container a game's entities are attached to
    pub fn container(&self, kind: GameKind) -> Option<HtmlElement> {
        match kind {
            GameKind::Ambient => dom::document()?.body(),
            GameKind::Hearts => self.game_field.clone(),
            GameKind::Balloons => self.balloon_field.clone(),
        }
    }

    pub fn apply(&mut self, event: &PageEvent) {
        match event {
            PageEvent::SceneChanged { scene, back_visible } => {
                if let Some(stack) = &self.stack {
                    let transform = format!("translateY(-{}vh)", scene.step() as u32 * 100);
                    let _ = stack.style().set_property("transform", &transform);
                }
                if let Some(btn) = &self.back_btn {
                    dom::set_hidden(btn, !back_visible);
                }
            }
            PageEvent::Game { kind, event } => self.apply_game(*kind, event),
            PageEvent::Toast { text, duration_ms } => dom::notify(text, *duration_ms),
            PageEvent::RizzChanged { value } => {
                dom::set_text("rizzValue", &value.to_string());
                if let Some(counter) = &self.rizz_counter {
                    dom::pulse(counter, "pulse", PULSE_MS);
                }
            }
            PageEvent::ProposalChanged(buttons) => {
                if let Some(yes) = &self.yes_btn {
                    let _ = yes
                        .style()
                        .set_property("transform", &format!("scale({})", buttons.yes_scale));
                }
                if let Some(no) = &self.no_btn {
                    let _ = no
                        .style()
                        .set_property("transform", &format!("translateX(-{}px)", buttons.no_offset_px));
                    dom::pulse(no, "tilt", 200);
                }
            }
            PageEvent::ReplayChanged { remaining } => {
                if let Some(btn) = &self.replay_btn {
                    btn.set_text_content(Some(&replay_label(*remaining)));
                    btn.set_disabled(*remaining == 0);
                }
            }
            PageEvent::OverlayChanged { open } => {
                if let Some(overlay) = &self.balloon_overlay {
                    dom::set_hidden(overlay, !open);
                }
            }
            PageEvent::PawBurst(burst) => self.burst(burst),
            PageEvent::ParticleExpired(id) => {
                if let Some(el) = self.particles.remove(id) {
                    el.remove();
                }
            }
            // Sound is played by the caller
            PageEvent::Cue(_) | PageEvent::Clip(_) | PageEvent::PageSound(_) => {}
        }
    }

    fn apply_game(&mut self, kind: GameKind, event: &GameEvent) {
        match (kind, event) {
            (_, GameEvent::Spawned(entity)) => self.spawn(kind, entity),
            (_, GameEvent::Removed { id, reason }) => {
                let Some(el) = self.entities.remove(&(kind, *id)) else {
                    return;
                };
                if *reason == Removal::Caught {
                    let _ = el.class_list().add_1("caught");
                    dom::set_timeout(CATCH_ANIM_MS, move || el.remove());
                } else {
                    el.remove();
                }
            }
            (GameKind::Hearts, GameEvent::Started) => {
                dom::set_text("collected", "0");
                dom::set_text("elapsed", "0");
            }
            (GameKind::Hearts, GameEvent::ScoreChanged(score)) => {
                dom::set_text("collected", &score.to_string());
            }
            (GameKind::Hearts, GameEvent::ElapsedChanged(secs)) => {
                dom::set_text("elapsed", &secs.to_string());
            }
            (GameKind::Balloons, GameEvent::Started) => dom::set_text("popped", "0"),
            (GameKind::Balloons, GameEvent::ScoreChanged(score)) => {
                dom::set_text("popped", &score.to_string());
            }
            _ => {}
        }
    }

    fn spawn(&mut self, kind: GameKind, entity: &Entity) {
        let (Some(container), Some(el)) = (self.container(kind), dom::create_div(class_for(kind)))
        else {
            return;
        };

        el.set_text_content(Some(&entity.symbol));
        let _ = el.set_attribute("data-game", kind.name());
        let _ = el.set_attribute("data-entity-id", &entity.id.0.to_string());
        let style = el.style();
        let _ = style.set_property("left", &format!("{}%", entity.x_percent));
        let _ = style.set_property("font-size", &format!("{}px", entity.size_px));
        if let Some(tint) = &entity.tint {
            let gradient = format!("linear-gradient(180deg, {}, {})", tint, shade_color(tint, -18));
            let _ = style.set_property("background", &gradient);
        }

        if container.append_child(&el).is_ok() {
            self.entities.insert((kind, entity.id), el);
        }
    }

    fn burst(&mut self, burst: &[Particle]) {
        let Some(paw) = &self.paw else { return };
        let Some(body) = dom::document().and_then(|d| d.body()) else {
            return;
        };
        dom::pulse(paw, "pulse", PULSE_MS);

        let rect = paw.get_bounding_client_rect();
        let (cx, cy) = (rect.left() + rect.width() / 2.0, rect.top() + rect.height() / 2.0);
        for particle in burst {
            let Some(el) = dom::create_div("paw-particle") else {
                continue;
            };
            el.set_text_content(Some(particle.symbol));
            let style = el.style();
            let _ = style.set_property("left", &format!("{}px", cx));
            let _ = style.set_property("top", &format!("{}px", cy));
            let _ = style.set_property("--dx", &format!("{}px", particle.offset.x));
            let _ = style.set_property("--dy", &format!("{}px", particle.offset.y));
            if body.append_child(&el).is_ok() {
                self.particles.insert(particle.id, el);
            }
        }
    }

    /// Position every live entity for the current frame
    pub fn render(&self, state: &PageState) {
        let now = state.now_ms();
        for kind in GameKind::ALL {
            let game = state.game(kind);
            if game.entities().is_empty() {
                continue;
            }
            let travel = self.travel_px(kind);
            for entity in game.entities() {
                let Some(el) = self.entities.get(&(kind, entity.id)) else {
                    continue;
                };
                let offset = entity_offset(entity.motion, entity.progress(now), travel);
                let transform = format!("translate({}px, {}px)", offset.x, offset.y);
                let _ = el.style().set_property("transform", &transform);
            }
        }
    }

    fn travel_px(&self, kind: GameKind) -> f32 {
        let height = match kind {
            GameKind::Ambient => web_sys::window()
                .and_then(|w| w.inner_height().ok())
                .and_then(|h| h.as_f64())
                .unwrap_or(800.0) as f32,
            _ => self.container(kind).map_or(0, |c| c.client_height()) as f32,
        };
        height + OFFSCREEN_PX
    }

    /// Drop every element the view created
    pub fn clear(&mut self) {
        for (_, el) in self.entities.drain() {
            el.remove();
        }
        for (_, el) in self.particles.drain() {
            el.remove();
        }
    }
}

//! `Surface` implementation on a 2D canvas context.

use crate::constants::STAR_SPRITE_URL;
use starfield_core::render::{RingStyle, Rgba, StarSprite, Surface};
use starfield_core::LinkSegment;
use std::cell::Cell;
use std::f64::consts::TAU;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    sprite: web::HtmlImageElement,
    sprite_ready: Rc<Cell<bool>>,
}

impl CanvasSurface {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> anyhow::Result<Self> {
        let sprite = web::HtmlImageElement::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let sprite_ready = Rc::new(Cell::new(false));
        load_sprite(&sprite, sprite_ready.clone());
        Ok(Self {
            ctx,
            sprite,
            sprite_ready,
        })
    }

    fn fill_circle(&self, radius: f32, alpha: f32, color: &str) {
        self.ctx.set_global_alpha(alpha as f64);
        self.ctx.set_fill_style_str(color);
        self.ctx.begin_path();
        _ = self.ctx.arc(0.0, 0.0, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }
}

/// Look up the 2D context of `canvas`.
pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("canvas has no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))
}

// Star bodies stay hidden until the sprite has decoded; a failed load keeps
// them hidden for the page lifetime.
fn load_sprite(img: &web::HtmlImageElement, ready: Rc<Cell<bool>>) {
    img.set_decoding("async");
    img.set_src(STAR_SPRITE_URL);
    let img = img.clone();
    spawn_local(async move {
        match JsFuture::from(img.decode()).await {
            Ok(_) => {
                ready.set(true);
                log::info!("[canvas] star sprite ready");
            }
            Err(e) => log::warn!("[canvas] star sprite failed to load: {:?}", e),
        }
    });
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn stroke_segments(&mut self, segments: &[LinkSegment], color: Rgba, line_width: f32) {
        let ctx = &self.ctx;
        ctx.begin_path();
        for s in segments {
            ctx.move_to(s.from.x as f64, s.from.y as f64);
            ctx.line_to(s.to.x as f64, s.to.y as f64);
        }
        ctx.set_line_width(line_width as f64);
        ctx.set_stroke_style_str(&color.css());
        ctx.stroke();
    }

    fn sprite_ready(&self) -> bool {
        self.sprite_ready.get()
    }

    fn draw_star(&mut self, sprite: &StarSprite) {
        let ctx = &self.ctx;
        let size = sprite.size as f64;
        ctx.save();
        ctx.set_global_alpha(sprite.alpha as f64);
        _ = ctx.translate(sprite.center.x as f64, sprite.center.y as f64);
        _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &self.sprite,
            -size / 2.0,
            -size / 2.0,
            size,
            size,
        );

        // Darken only the pixels the sprite just covered
        _ = ctx.set_global_composite_operation("source-atop");
        self.fill_circle(sprite.overlay_radius, sprite.darkness_alpha, "rgba(0, 0, 0, 1)");

        if let Some(glow) = sprite.glow_alpha {
            _ = ctx.set_global_composite_operation("lighter");
            self.fill_circle(sprite.overlay_radius, glow, "rgba(255, 255, 255, 1)");
        }
        ctx.restore();
    }

    fn stroke_ring(&mut self, ring: &RingStyle) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_line_width(ring.width as f64);
        ctx.set_stroke_style_str(&ring.color.css());
        ctx.begin_path();
        _ = ctx.arc(
            ring.center.x as f64,
            ring.center.y as f64,
            ring.radius as f64,
            0.0,
            TAU,
        );
        ctx.stroke();
        ctx.restore();
    }
}

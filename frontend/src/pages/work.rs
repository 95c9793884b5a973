use yew::prelude::*;
use yew_router::prelude::*;
use log::info;

use crate::Route;
use crate::catalog::{next_project, project};
use crate::choreography::{use_choreography, Ease, Pose, Result, Score, Stage, Timeline, Tween};
use crate::components::lightbox::{Lightbox, Slide};

/// Project page entrance: title, then description, then the gallery.
pub struct WorkScore;

pub fn entrance() -> Timeline {
    let hidden = |y: f64| Pose::IDENTITY.y_px(y).opacity(0.0);
    Timeline::new()
        .at(0.0, Tween::from(".page-title", hidden(100.0), 1500.0).ease(Ease::Power4Out))
        .then(-1000.0, Tween::from(".page-desc", hidden(50.0), 1000.0).ease(Ease::Power3Out))
        .then(
            -500.0,
            Tween::from(".gallery-img", hidden(100.0), 1000.0)
                .ease(Ease::Power3Out)
                .stagger(100.0),
        )
}

impl Score for WorkScore {
    fn shared(&self, stage: &mut Stage<'_>) -> Result<()> {
        stage.play(entrance());
        Ok(())
    }
}

#[derive(Properties, PartialEq)]
pub struct WorkProps {
    pub slug: String,
}

#[function_component(Work)]
pub fn work(props: &WorkProps) -> Html {
    let current = project(&props.slug);
    let next = next_project(current);
    let lightbox_open = use_state(|| false);
    let lightbox_index = use_state(|| 0usize);

    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            props.slug.clone(),
        );
    }

    // Re-mounted per slug so the entrance replays on every collection.
    let choreography = use_choreography(props.slug.clone(), |_| WorkScore);

    let slides: Vec<Slide> = current.images.iter().copied().map(Slide::from).collect();

    let on_close = {
        let lightbox_open = lightbox_open.clone();
        let choreography = choreography.clone();
        Callback::from(move |_| {
            lightbox_open.set(false);
            choreography.resume();
        })
    };

    html! {
        <div class="work">
            <style>
                {r#"
                    .work-nav {
                        position: fixed;
                        top: 0;
                        width: 100%;
                        padding: 2rem;
                        display: flex;
                        justify-content: space-between;
                        align-items: center;
                        z-index: 50;
                        mix-blend-mode: difference;
                        box-sizing: border-box;
                    }
                    .back-link {
                        font-size: 0.75rem;
                        font-weight: bold;
                        text-transform: uppercase;
                        letter-spacing: 0.1em;
                        color: #fff;
                        text-decoration: none;
                        transition: color 0.3s;
                    }
                    .back-link:hover {
                        color: #ef4444;
                    }
                    .work-header {
                        padding: 10rem 1.5rem 5rem;
                        max-width: 80rem;
                        margin: 0 auto;
                    }
                    .page-title {
                        font-family: var(--font-display);
                        font-size: clamp(3.75rem, 10vw, 8rem);
                        font-weight: 900;
                        text-transform: uppercase;
                        line-height: 1;
                        margin: 0 0 2.5rem;
                    }
                    .page-desc {
                        max-width: 36rem;
                        border-left: 1px solid rgba(255, 255, 255, 0.2);
                        padding-left: 2rem;
                    }
                    .page-desc p {
                        color: #9ca3af;
                        font-size: 1.25rem;
                        line-height: 1.6;
                        font-family: var(--font-serif);
                        font-style: italic;
                    }
                    .masonry {
                        columns: 3;
                        column-gap: 2rem;
                        padding: 0 2.5rem 8rem;
                    }
                    .gallery-img {
                        break-inside: avoid;
                        margin-bottom: 2rem;
                        position: relative;
                        overflow: hidden;
                        cursor: zoom-in;
                    }
                    .gallery-img img {
                        width: 100%;
                        display: block;
                        object-fit: cover;
                        filter: grayscale(1);
                        transition: filter 0.7s, transform 0.7s;
                    }
                    .gallery-img:hover img {
                        filter: none;
                        transform: scale(1.05);
                    }
                    .view-full {
                        position: absolute;
                        inset: 0;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        background: rgba(0, 0, 0, 0.4);
                        opacity: 0;
                        transition: opacity 0.3s;
                        pointer-events: none;
                        font-size: 0.75rem;
                        font-weight: bold;
                        text-transform: uppercase;
                        letter-spacing: 0.1em;
                    }
                    .gallery-img:hover .view-full {
                        opacity: 1;
                    }
                    .next-collection {
                        height: 60vh;
                        background: #0a0a0a;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        border-top: 1px solid rgba(255, 255, 255, 0.1);
                        position: relative;
                        overflow: hidden;
                    }
                    .next-bg {
                        position: absolute;
                        inset: 0;
                        opacity: 0.2;
                        transition: opacity 0.7s;
                    }
                    .next-collection:hover .next-bg {
                        opacity: 0.4;
                    }
                    .next-bg img {
                        width: 100%;
                        height: 100%;
                        object-fit: cover;
                        filter: grayscale(1);
                    }
                    .next-link {
                        position: relative;
                        z-index: 10;
                        text-align: center;
                        color: #fff;
                        text-decoration: none;
                    }
                    .next-link h2 {
                        font-family: var(--font-display);
                        font-size: clamp(3.75rem, 8vw, 6rem);
                        font-weight: 900;
                        text-transform: uppercase;
                        margin: 0;
                        transition: transform 0.7s;
                    }
                    .next-collection:hover .next-link h2 {
                        transform: scale(1.1);
                    }
                    @media (max-width: 1024px) {
                        .masonry {
                            columns: 2;
                        }
                    }
                    @media (max-width: 767px) {
                        .masonry {
                            columns: 1;
                            padding: 0 1rem 8rem;
                        }
                    }
                "#}
            </style>

            <nav class="work-nav">
                <Link<Route> to={Route::Home} classes="back-link">{"← Back Home"}</Link<Route>>
                <span style="font-family: var(--font-display); font-weight: bold; text-transform: uppercase; font-size: 1.25rem;">{"Venox."}</span>
            </nav>

            <header class="work-header">
                <span class="eyebrow" style="display: block; color: #dc2626; font-weight: bold; text-transform: uppercase; letter-spacing: 0.3em; font-size: 0.75rem; margin-bottom: 1rem;">
                    {format!("Selected Works · {}", current.subtitle)}
                </span>
                <h1 class="page-title stroke-white">{current.title}</h1>
                <div class="page-desc">
                    <p>{current.desc}</p>
                </div>
            </header>

            <section class="masonry">
                {
                    current.images.iter().enumerate().map(|(index, src)| {
                        let onclick = {
                            let lightbox_open = lightbox_open.clone();
                            let lightbox_index = lightbox_index.clone();
                            let choreography = choreography.clone();
                            Callback::from(move |_: MouseEvent| {
                                info!("Opening lightbox at {}", index);
                                choreography.pause();
                                lightbox_index.set(index);
                                lightbox_open.set(true);
                            })
                        };
                        html! {
                            <div key={index} class="gallery-img" {onclick}>
                                <img src={*src} alt="Project" />
                                <div class="view-full">{"View Full"}</div>
                            </div>
                        }
                    }).collect::<Html>()
                }
            </section>

            <section class="next-collection">
                <div class="next-bg">
                    <img src={next.images.first().copied().unwrap_or_default()} alt="" />
                </div>
                <Link<Route> to={Route::Work { slug: next.slug.to_string() }} classes="next-link">
                    <p style="font-size: 0.75rem; font-weight: bold; text-transform: uppercase; letter-spacing: 0.4em; color: rgba(255, 255, 255, 0.6);">{"Next Collection"}</p>
                    <h2>{next.title}</h2>
                    <div style="margin-top: 2rem; display: inline-block; border-bottom: 1px solid #dc2626; color: #ef4444; font-weight: bold; text-transform: uppercase; letter-spacing: 0.1em;">
                        {"Discover →"}
                    </div>
                </Link<Route>>
            </section>

            <Lightbox
                open={*lightbox_open}
                index={*lightbox_index}
                slides={slides}
                on_close={on_close}
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::choreography::surface::Rect;
    use crate::choreography::testing::{FakeSurface, ManualScheduler};
    use crate::choreography::{Choreography, ChoreographyConfig};

    #[test]
    fn test_entrance_sequence() {
        let timeline = entrance();
        let starts: Vec<f64> = timeline.tweens().iter().map(|t| t.at_ms).collect();
        assert_eq!(starts, vec![0.0, 500.0, 1_000.0]);
    }

    #[test]
    fn test_gallery_fades_in_and_reverts_on_navigation() {
        let surface = Rc::new(
            FakeSurface::new(1_280.0, 800.0)
                .with_element(".page-title", Rect::new(160.0, 0.0, 1_000.0, 128.0))
                .with_element(".page-desc", Rect::new(330.0, 0.0, 576.0, 120.0))
                .with_elements(".gallery-img", vec![Rect::new(600.0, 0.0, 380.0, 500.0); 4]),
        );
        let scheduler = Rc::new(ManualScheduler::default());
        let engine = Choreography::mount(ChoreographyConfig::default(), surface.clone(), scheduler.clone(), WorkScore);
        assert_eq!(surface.style_nth(".gallery-img", 3, "opacity").as_deref(), Some("0"));

        scheduler.frame(0.0);
        scheduler.frame(5_000.0);
        assert_eq!(surface.style_nth(".gallery-img", 3, "opacity").as_deref(), Some("1"));
        assert_eq!(surface.style(".page-title", "transform").as_deref(), Some("none"));

        engine.destroy();
        assert_eq!(surface.style(".gallery-img", "opacity"), None);
    }
}

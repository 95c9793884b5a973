use yew::prelude::*;
use yew_hooks::prelude::*;
use web_sys::KeyboardEvent;
use log::debug;

#[derive(Clone, PartialEq)]
pub struct Slide {
    pub src: AttrValue,
}

impl From<&'static str> for Slide {
    fn from(src: &'static str) -> Self {
        Slide { src: AttrValue::Static(src) }
    }
}

#[derive(Properties, PartialEq)]
pub struct LightboxProps {
    pub open: bool,
    pub index: usize,
    pub slides: Vec<Slide>,
    pub on_close: Callback<()>,
}

/// Moves `delta` slides from `index`, wrapping at both ends.
pub fn step(index: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (index as isize + delta).rem_euclid(len as isize) as usize
}

pub fn counter(index: usize, len: usize) -> String {
    format!("{} / {}", index + 1, len)
}

#[function_component(Lightbox)]
pub fn lightbox(props: &LightboxProps) -> Html {
    let current = use_state(|| props.index);

    {
        let current = current.clone();
        use_effect_with_deps(
            move |(open, index)| {
                if *open {
                    current.set(*index);
                }
                || ()
            },
            (props.open, props.index),
        );
    }

    {
        let current = current.clone();
        let open = props.open;
        let len = props.slides.len();
        let on_close = props.on_close.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if !open {
                return;
            }
            match e.key().as_str() {
                "Escape" => on_close.emit(()),
                "ArrowLeft" => current.set(step(*current, -1, len)),
                "ArrowRight" => current.set(step(*current, 1, len)),
                _ => {}
            }
        });
    }

    if !props.open || props.slides.is_empty() {
        return html! {};
    }

    let len = props.slides.len();
    let index = (*current).min(len - 1);
    let slide = &props.slides[index];
    debug!("Lightbox showing {}", counter(index, len));

    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_close_button = on_backdrop.clone();
    let on_prev = {
        let current = current.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            current.set(step(*current, -1, len));
        })
    };
    let on_next = {
        let current = current.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            current.set(step(*current, 1, len));
        })
    };
    let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="lightbox" onclick={on_backdrop}>
            <style>
                {r#"
                    .lightbox {
                        position: fixed;
                        inset: 0;
                        z-index: 10000;
                        background: rgba(0, 0, 0, 0.92);
                        display: flex;
                        align-items: center;
                        justify-content: center;
                    }
                    .lightbox img {
                        max-width: 90vw;
                        max-height: 85vh;
                        object-fit: contain;
                    }
                    .lightbox-btn {
                        position: absolute;
                        background: none;
                        border: none;
                        color: #fff;
                        font-size: 2rem;
                        cursor: pointer;
                        padding: 1rem;
                        opacity: 0.7;
                        transition: opacity 0.2s;
                    }
                    .lightbox-btn:hover {
                        opacity: 1;
                    }
                    .lightbox-prev { left: 1rem; top: 50%; transform: translateY(-50%); }
                    .lightbox-next { right: 1rem; top: 50%; transform: translateY(-50%); }
                    .lightbox-close { right: 1rem; top: 1rem; }
                    .lightbox-counter {
                        position: absolute;
                        left: 2rem;
                        top: 2rem;
                        color: rgba(255, 255, 255, 0.7);
                        font-size: 0.75rem;
                        letter-spacing: 0.2em;
                    }
                "#}
            </style>
            <span class="lightbox-counter">{counter(index, len)}</span>
            <button class="lightbox-btn lightbox-close" onclick={on_close_button} aria-label="Close">{"✕"}</button>
            <button class="lightbox-btn lightbox-prev" onclick={on_prev} aria-label="Previous">{"←"}</button>
            <img src={slide.src.clone()} alt="Project" onclick={keep_open} />
            <button class="lightbox-btn lightbox-next" onclick={on_next} aria-label="Next">{"→"}</button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_wraps_both_ways() {
        assert_eq!(step(0, -1, 5), 4);
        assert_eq!(step(4, 1, 5), 0);
        assert_eq!(step(2, 1, 5), 3);
        assert_eq!(step(0, 1, 0), 0);
    }

    #[test]
    fn test_counter_is_one_based() {
        assert_eq!(counter(0, 21), "1 / 21");
        assert_eq!(counter(20, 21), "21 / 21");
    }
}

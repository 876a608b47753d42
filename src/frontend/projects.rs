use std::num::NonZeroUsize;

use yew::prelude::*;

use super::{browser::BrowserScheduler, use_performance_mode};
use crate::{
    carousel::{Carousel, CarouselDriver, CarouselProfile},
    content::{Project, PROJECTS},
    profile::{Profile, SurfaceProfile},
};

#[derive(Properties, PartialEq)]
struct ProjectCardProps {
    project: Project,
}

#[function_component(ProjectCard)]
fn project_card(props: &ProjectCardProps) -> Html {
    let project = &props.project;

    html! {
        <article class="project-card">
            <img
                class="project-shot"
                src={project.screenshot}
                alt={format!("{} screenshot", project.name)}
                loading="lazy"
                draggable="false"
            />
            <div class="project-copy">
                <h3>{project.name}</h3>
                <p>{project.description}</p>
                <ul class="tag-list">
                    { for project.tech.iter().map(|tech| html! { <li class="tag">{*tech}</li> }) }
                </ul>
                <div class="project-links">
                    if let Some(live) = project.live_link {
                        <a class="link" href={live} target="_blank" rel="noopener noreferrer">{"Live"}</a>
                    }
                    if let Some(source) = project.source_link {
                        <a class="link" href={source} target="_blank" rel="noopener noreferrer">{"Source"}</a>
                    }
                </div>
            </div>
        </article>
    }
}

#[function_component(Projects)]
pub fn projects() -> Html {
    let mode = use_performance_mode();
    let profile = CarouselProfile::resolve(mode);
    let surface = SurfaceProfile::resolve(mode);
    let slide_count = NonZeroUsize::new(PROJECTS.len()).unwrap_or(NonZeroUsize::MIN);

    let carousel = use_state(|| Carousel::new(slide_count));
    let driver = use_mut_ref(|| None::<CarouselDriver<BrowserScheduler>>);
    let drag_origin = use_mut_ref(|| None::<i32>);

    {
        let carousel = carousel.clone();
        let driver = driver.clone();
        use_effect_with((), move |_| {
            let sink = carousel.clone();
            let next = CarouselDriver::new(slide_count, mode, BrowserScheduler, move |snapshot| {
                sink.set(snapshot)
            });
            carousel.set(next.snapshot());
            *driver.borrow_mut() = Some(next);

            move || {
                driver.borrow_mut().take();
            }
        });
    }

    {
        let driver = driver.clone();
        use_effect_with(mode, move |mode| {
            if let Some(driver) = driver.borrow().as_ref() {
                driver.set_mode(*mode);
            }
            || ()
        });
    }

    let on_previous = {
        let driver = driver.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(driver) = driver.borrow().as_ref() {
                driver.previous();
            }
        })
    };

    let on_next = {
        let driver = driver.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(driver) = driver.borrow().as_ref() {
                driver.next();
            }
        })
    };

    let on_pointer_down = {
        let drag_origin = drag_origin.clone();
        Callback::from(move |event: PointerEvent| {
            *drag_origin.borrow_mut() = Some(event.client_x());
        })
    };

    let on_pointer_up = {
        let drag_origin = drag_origin.clone();
        let driver = driver.clone();
        Callback::from(move |event: PointerEvent| {
            let Some(origin) = drag_origin.borrow_mut().take() else {
                return;
            };
            if let Some(driver) = driver.borrow().as_ref() {
                driver.release_drag(f64::from(event.client_x() - origin));
            }
        })
    };

    let on_pointer_cancel = {
        let drag_origin = drag_origin.clone();
        Callback::from(move |_: PointerEvent| {
            drag_origin.borrow_mut().take();
        })
    };

    let direction = carousel.direction();
    let slide_style = profile.slide_style();

    html! {
        <div class={classes!(surface.panel_class, "projects-panel")}>
            <h2 class="section-heading">{"Projects"}</h2>
            <div
                class={classes!("carousel", profile.drag.then_some("is-draggable"))}
                onpointerdown={profile.drag.then(|| on_pointer_down.clone())}
                onpointerup={profile.drag.then(|| on_pointer_up.clone())}
                onpointercancel={profile.drag.then(|| on_pointer_cancel.clone())}
                onpointerleave={profile.drag.then(|| on_pointer_cancel.clone())}
            >
                { for carousel.visible_slides().into_iter().map(|slide| {
                    let project = PROJECTS[slide.index];
                    html! {
                        <div
                            key={project.id}
                            class={classes!("carousel-slide", slide.motion_class(direction))}
                            style={format!("z-index: {}; {slide_style}", slide.layer)}
                        >
                            <ProjectCard {project} />
                        </div>
                    }
                }) }
                <button
                    class={classes!("carousel-arrow", "arrow-previous", surface.button_class())}
                    type="button"
                    aria-label="Previous project"
                    onclick={on_previous}
                >
                    {"‹"}
                </button>
                <button
                    class={classes!("carousel-arrow", "arrow-next", surface.button_class())}
                    type="button"
                    aria-label="Next project"
                    onclick={on_next}
                >
                    {"›"}
                </button>
            </div>
            <div class="carousel-dots">
                { for (0..carousel.slide_count()).map(|index| {
                    let onclick = {
                        let driver = driver.clone();
                        Callback::from(move |_: MouseEvent| {
                            if let Some(driver) = driver.borrow().as_ref() {
                                driver.select(index);
                            }
                        })
                    };
                    html! {
                        <button
                            class={classes!("carousel-dot", (index == carousel.index()).then_some("is-active"))}
                            type="button"
                            aria-label={format!("Go to project {}", index + 1)}
                            aria-current={(index == carousel.index()).then_some("true")}
                            {onclick}
                        />
                    }
                }) }
            </div>
        </div>
    }
}

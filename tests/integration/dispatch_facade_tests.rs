use oxide_hooks::{
    render, use_state, ComponentHandle, Dispatch, Dispatcher, HookError, Hooks, SetState,
};

use super::{any_screen, counter_app, init_logging, Switches};

struct Greeting {
    text: &'static str,
    set_text: SetState<&'static str>,
}

impl ComponentHandle for Greeting {
    fn render(&self) -> Result<(), HookError> {
        Ok(())
    }
}

fn greeting(hooks: &mut Hooks) -> Result<Greeting, HookError> {
    let (text, set_text) = use_state(hooks, "hello")?;
    Ok(Greeting { text, set_text })
}

// Forwards to an inner dispatcher, counting completed renders
#[derive(Default)]
struct CountingDispatcher {
    inner: Dispatcher,
    renders: usize,
}

impl Dispatch for CountingDispatcher {
    fn render<C, H, E>(&mut self, component: &C) -> Result<H, E>
    where
        C: Fn(&mut Hooks) -> Result<H, E> + 'static,
        H: ComponentHandle<E>,
        E: From<HookError>,
    {
        let handle = self.inner.render(component)?;
        self.renders += 1;
        Ok(handle)
    }
}

#[test]
fn given_the_facade_should_forward_to_the_given_dispatcher() {
    init_logging();

    let mut dispatcher = Dispatcher::new();

    let handle = render(&mut dispatcher, &greeting).unwrap();
    assert_eq!(handle.text, "hello");

    handle.set_text.set("goodbye");
    let handle = render(&mut dispatcher, &greeting).unwrap();
    assert_eq!(handle.text, "goodbye");
}

#[test]
fn given_a_substituted_dispatcher_should_route_renders_through_it() {
    init_logging();

    let app = counter_app(any_screen(), Switches::default());
    let mut dispatcher = CountingDispatcher::default();

    render(&mut dispatcher, &app).unwrap().click();
    let handle = render(&mut dispatcher, &app).unwrap();

    assert_eq!(handle.count, 2);
    assert_eq!(dispatcher.renders, 2);
}

#[test]
fn given_a_failing_render_through_a_substituted_dispatcher_should_not_count_it() {
    init_logging();

    let switches = Switches::default();
    switches.fail_component(true);
    let app = counter_app(any_screen(), switches);
    let mut dispatcher = CountingDispatcher::default();

    assert!(render(&mut dispatcher, &app).is_err());
    assert_eq!(dispatcher.renders, 0);
}

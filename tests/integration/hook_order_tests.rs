use std::any::type_name;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use oxide_hooks::{ComponentHandle, Dispatcher, HookError, Hooks, SetState, Violation};

use super::init_logging;

struct Probe {
    count: u32,
    set_count: SetState<u32>,
    label: Option<String>,
}

impl ComponentHandle for Probe {
    fn render(&self) -> Result<(), HookError> {
        Ok(())
    }
}

// Calls a second hook only while `with_label` is set
fn conditional_component(
    with_label: Arc<AtomicBool>,
) -> impl Fn(&mut Hooks) -> Result<Probe, HookError> + 'static {
    move |hooks: &mut Hooks| -> Result<Probe, HookError> {
        let (count, set_count) = hooks.use_state(0u32)?;
        let label = if with_label.load(Ordering::SeqCst) {
            Some(hooks.use_state(String::from("label"))?.0)
        } else {
            None
        };
        Ok(Probe {
            count,
            set_count,
            label,
        })
    }
}

#[test]
fn given_an_extra_hook_on_rerender_should_fail_with_hook_order_violation() {
    init_logging();

    let with_label = Arc::new(AtomicBool::new(false));
    let component = conditional_component(with_label.clone());
    let mut dispatcher = Dispatcher::new();

    dispatcher.render(&component).unwrap();

    with_label.store(true, Ordering::SeqCst);
    let error = dispatcher.render(&component).err().unwrap();

    assert!(matches!(
        error,
        HookError::HookOrderViolation {
            slot: 1,
            violation: Violation::ExtraHook { expected: 1 },
            ..
        }
    ));
}

#[test]
fn given_a_missing_hook_on_rerender_should_fail_with_hook_order_violation() {
    init_logging();

    let with_label = Arc::new(AtomicBool::new(true));
    let component = conditional_component(with_label.clone());
    let mut dispatcher = Dispatcher::new();

    let handle = dispatcher.render(&component).unwrap();
    assert_eq!(handle.label.as_deref(), Some("label"));

    with_label.store(false, Ordering::SeqCst);
    let error = dispatcher.render(&component).err().unwrap();

    assert!(matches!(
        error,
        HookError::HookOrderViolation {
            slot: 1,
            violation: Violation::MissingHook {
                expected: 2,
                found: 1
            },
            ..
        }
    ));
}

#[test]
fn given_a_violation_should_preserve_state_for_a_conforming_rerender() {
    init_logging();

    let with_label = Arc::new(AtomicBool::new(false));
    let component = conditional_component(with_label.clone());
    let mut dispatcher = Dispatcher::new();

    dispatcher.render(&component).unwrap().set_count.set(7);

    with_label.store(true, Ordering::SeqCst);
    assert!(dispatcher.render(&component).is_err());

    with_label.store(false, Ordering::SeqCst);
    let handle = dispatcher.render(&component).unwrap();
    assert_eq!(handle.count, 7);
    assert_eq!(handle.label, None);
}

#[test]
fn given_a_changed_slot_type_should_fail_with_hook_order_violation() {
    init_logging();

    let as_text = Arc::new(AtomicBool::new(false));
    let component = {
        let as_text = as_text.clone();
        move |hooks: &mut Hooks| -> Result<Probe, HookError> {
            let (count, set_count) = if as_text.load(Ordering::SeqCst) {
                hooks.use_state("zero")?;
                hooks.use_state(0u32)?
            } else {
                hooks.use_state(0u32)?
            };
            Ok(Probe {
                count,
                set_count,
                label: None,
            })
        }
    };
    let mut dispatcher = Dispatcher::new();

    dispatcher.render(&component).unwrap();

    as_text.store(true, Ordering::SeqCst);
    let error = dispatcher.render(&component).err().unwrap();

    assert_eq!(
        error,
        HookError::HookOrderViolation {
            component: type_name_of(&component),
            slot: 0,
            violation: Violation::TypeChanged {
                expected: type_name::<u32>(),
                found: type_name::<&str>(),
            },
        }
    );
}

#[test]
fn given_a_component_that_swallows_a_violation_should_still_fail_the_render() {
    init_logging();

    let with_extra = Arc::new(AtomicBool::new(false));
    let component = {
        let with_extra = with_extra.clone();
        move |hooks: &mut Hooks| -> Result<Probe, HookError> {
            let (count, set_count) = hooks.use_state(0u32)?;
            if with_extra.load(Ordering::SeqCst) {
                let _ = hooks.use_state(false);
            }
            Ok(Probe {
                count,
                set_count,
                label: None,
            })
        }
    };
    let mut dispatcher = Dispatcher::new();

    dispatcher.render(&component).unwrap();

    with_extra.store(true, Ordering::SeqCst);
    assert!(matches!(
        dispatcher.render(&component),
        Err(HookError::HookOrderViolation {
            violation: Violation::ExtraHook { .. },
            ..
        })
    ));
}

#[test]
fn given_multiple_hooks_should_keep_each_slot_independent() {
    init_logging();

    struct Form {
        name: String,
        set_name: SetState<String>,
        age: u8,
        set_age: SetState<u8>,
    }

    impl ComponentHandle for Form {
        fn render(&self) -> Result<(), HookError> {
            Ok(())
        }
    }

    fn form(hooks: &mut Hooks) -> Result<Form, HookError> {
        let (name, set_name) = hooks.use_state(String::from("anonymous"))?;
        let (age, set_age) = hooks.use_state(0u8)?;
        Ok(Form {
            name,
            set_name,
            age,
            set_age,
        })
    }

    let mut dispatcher = Dispatcher::new();

    let handle = dispatcher.render(&form).unwrap();
    assert_eq!((handle.name.as_str(), handle.age), ("anonymous", 0));

    handle.set_age.update(|age| age + 30);
    let handle = dispatcher.render(&form).unwrap();
    assert_eq!((handle.name.as_str(), handle.age), ("anonymous", 30));

    handle.set_name.set(String::from("ada"));
    let handle = dispatcher.render(&form).unwrap();
    assert_eq!((handle.name.as_str(), handle.age), ("ada", 30));
}

fn type_name_of<T>(_value: &T) -> &'static str {
    type_name::<T>()
}

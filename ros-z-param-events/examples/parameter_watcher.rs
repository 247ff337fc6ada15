use ros_z_param_events::{
    Builder, ParameterEventHandler, Result,
    transport::LocalEventBus,
    wire::{WireParameter, WireParameterEvent, WireParameterValue, parameter_type},
};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let bus = LocalEventBus::new("watcher", "/demo");
    let handler = ParameterEventHandler::builder(&bus).build()?;

    let _rate = handler.add_parameter_callback_for_node("rate", "/demo/talker", |p| {
        println!("rate changed: {:?}", p.value);
    })?;
    let _all = handler.add_parameter_event_callback(|event| {
        println!(
            "event from {}: {} new, {} changed, {} deleted",
            event.node,
            event.new_parameters.len(),
            event.changed_parameters.len(),
            event.deleted_parameters.len()
        );
    });

    // Simulate a talker node changing its rate.
    bus.publish(&WireParameterEvent {
        node: "/demo/talker".to_string(),
        changed_parameters: vec![WireParameter {
            name: "rate".to_string(),
            value: WireParameterValue {
                r#type: parameter_type::DOUBLE,
                double_value: 5.0,
                ..Default::default()
            },
        }],
        ..Default::default()
    });

    Ok(())
}

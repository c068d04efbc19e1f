use argus_core::{config::Configuration, Metric, TransformError};
use argus_transform::{engines::Pipeline, Function, TransformFactory};

fn host_metric(host: &str, region: &str, env: &str) -> Metric {
    let mut metric = Metric::new("system.dc1", "cpu.idle").unwrap();
    metric.set_tag("host", host).unwrap();
    metric.set_tag("region", region).unwrap();
    metric.set_tag("env", env).unwrap();
    metric.add_datapoints(vec![(1_000, 1.0), (2_000, 2.0)]);

    metric
}

#[test]
fn aliasbytag_from_factory_labels_metrics() {
    let transform = TransformFactory::new().get_transform("aliasbytag").unwrap();
    let mut metrics = vec![
        host_metric("h1", "us", "prod"),
        host_metric("h2", "eu", "dev"),
    ];

    let keys = vec!["env".to_string(), "host".to_string()];
    transform
        .transform_with_constants(&mut metrics, &keys)
        .unwrap();

    let labels = metrics
        .iter()
        .map(|m| m.display_name().unwrap_or_default())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["prod,h1", "dev,h2"]);

    transform.transform(&mut metrics).unwrap();

    let labels = metrics
        .iter()
        .map(|m| m.display_name().unwrap_or_default())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["prod,h1,us", "dev,h2,eu"]);
}

#[test]
fn aliasbytag_rejects_list_of_lists() {
    let transform = TransformFactory::new()
        .get_transform(Function::AliasByTag.name())
        .unwrap();

    let err = transform.transform_lists(&mut []).unwrap_err();

    assert_eq!(
        err.to_string(),
        "this transform does not operate over multiple metric lists."
    );
    assert!(!err.is_retryable());
}

#[test]
fn pipeline_built_from_factory() {
    let factory = TransformFactory::new();
    let mut conf = Configuration::default();

    conf.push_transform(
        "scope",
        Some(vec![
            "/^system\\.(.*)$/host.$1/".to_string(),
            "regex".to_string(),
            "prod".to_string(),
            "literal".to_string(),
        ]),
        factory.get_transform("ALIAS").unwrap(),
    );
    conf.push_transform("label", None, factory.get_transform("ALIASBYTAG").unwrap());

    let pipeline = Pipeline::start(conf);
    let mut metrics = vec![Metric::new("system.dc1", "system.cpu").unwrap(), host_metric("h1", "us", "prod")];

    pipeline.run(Some(&mut metrics)).unwrap();

    assert_eq!(metrics[0].metric(), "host.cpu");
    assert_eq!(metrics[0].scope(), "prod");
    assert_eq!(metrics[0].display_name(), None);
    assert_eq!(metrics[1].metric(), "cpu.idle");
    assert_eq!(metrics[1].display_name(), Some("prod,h1,us"));
}

#[test]
fn pipeline_without_metrics_is_invalid() {
    let pipeline = Pipeline::start(Configuration::default());
    assert!(pipeline.is_empty());

    let err = pipeline.run(None).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<TransformError>(),
        Some(TransformError::InvalidArgument(_))
    ));
}

use crate::error::Error;
use crate::parse;
use crate::parser::{ModelLine, ParamAssign, SpiceLine, SubcktLine};
use crate::Definition;

const SPICE_RESISTOR: &str = r#"
.subckt my_resistor p n
R1 p n 100
.ends
"#;

const DIODE_LIBRARY: &str = r#"
* Small-signal diodes
.model 1N4148 D(IS=4.352n N=1.906 BV=110 IBV=0.0001
+ RS=0.6458 CJO=7.048p)
.MODEL DLIM d is=1e-15 ; clamp
"#;

const OPAMP_LIBRARY: &str = r#"
.subckt opamp inp inn out vcc vee params: gain=100k rout=75
.model dclamp D(IS=1e-15)
E1 mid 0 inp inn {gain}
R1 mid out {rout}
.ends opamp
.subckt follower in out
X1 in out out vcc vee opamp
.ends
"#;

#[test]
fn test_spice_resistor() {
    let parsed = parse(&SPICE_RESISTOR).unwrap();
    assert_eq!(parsed.subcircuits().count(), 1);
    assert_eq!(
        parsed.subcircuits().next().unwrap(),
        &SubcktLine {
            name: "my_resistor",
            ports: vec!["p", "n"],
            params: vec![],
        }
    );
    assert_eq!(parsed.lines[1], SpiceLine::Other("R1 p n 100"));
    assert_eq!(parsed.lines[2], SpiceLine::Ends(None));
}

#[test]
fn test_model_with_continuation() {
    let parsed = parse(&DIODE_LIBRARY).unwrap();
    assert_eq!(parsed.lines[0], SpiceLine::Comment("Small-signal diodes"));

    let models: Vec<_> = parsed.models().collect();
    assert_eq!(models.len(), 2);
    assert_eq!(models[0].name, "1N4148");
    assert_eq!(models[0].kind, "D");
    let names: Vec<_> = models[0].params.iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["IS", "N", "BV", "IBV", "RS", "CJO"]);
    assert_eq!(models[0].params[5].value, Some("7.048p"));

    assert_eq!(
        models[1],
        &ModelLine {
            name: "DLIM",
            kind: "d",
            params: vec![ParamAssign {
                name: "is",
                value: Some("1e-15"),
            }],
        }
    );
}

#[test]
fn test_subckt_params_and_nesting() {
    let parsed = parse(&OPAMP_LIBRARY).unwrap();
    let opamp = parsed.subcircuit_named("opamp").unwrap();
    assert_eq!(opamp.ports, vec!["inp", "inn", "out", "vcc", "vee"]);
    assert_eq!(
        opamp.params,
        vec![
            ParamAssign {
                name: "gain",
                value: Some("100k"),
            },
            ParamAssign {
                name: "rout",
                value: Some("75"),
            },
        ]
    );

    // The clamp model is local to `opamp` and is not a top-level definition.
    let defs = parsed.definitions();
    assert_eq!(defs.len(), 2);
    assert!(matches!(defs[0], Definition::Subckt(s) if s.name == "opamp"));
    assert!(matches!(defs[1], Definition::Subckt(s) if s.name == "follower"));
    assert_eq!(parsed.models().count(), 1);
}

#[test]
fn test_model_flags() {
    let parsed = parse(".model dsw D level3 is=2n\n").unwrap();
    let model = parsed.models().next().unwrap();
    assert_eq!(model.params.len(), 2);
    assert!(model.params.iter().any(|p| p.name == "level3" && p.is_flag()));
}

#[test]
fn test_malformed_model() {
    let err = parse(".model onlyname\n").unwrap_err();
    assert!(matches!(err, Error::MalformedDirective { directive, .. } if directive == ".model"));

    let err = parse(".model d1 D(IS=)\n").unwrap_err();
    assert!(matches!(err, Error::MalformedDirective { .. }));
}

#[test]
fn test_unbalanced_subckt() {
    assert_eq!(
        parse(".subckt open a b\nR1 a b 1k\n").unwrap_err(),
        Error::UnterminatedSubckt("open".to_string())
    );
    assert_eq!(parse("R1 a b 1k\n.ends\n").unwrap_err(), Error::UnexpectedEnds);
}

#[test]
fn test_empty_input() {
    let parsed = parse("").unwrap();
    assert_eq!(parsed.lines().count(), 0);
    assert!(parse("\n\n  \n").unwrap().definitions().is_empty());
}

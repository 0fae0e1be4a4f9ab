use anyhow::{anyhow, ensure, Context, Result};

use crate::builder::CircuitBuilder;
use crate::circuit::Circuit;
use crate::gate::GateKind;

/// Parses the line-oriented netlist format.
///
/// One statement per line; `#` starts a comment. `input` and `output`
/// declare the circuit boundary, any other keyword is a gate driving the
/// first named wire from the remaining ones:
///
/// ```text
/// # carry bit of a half adder
/// input a
/// input b
/// and c a b
/// output c
/// ```
pub fn parse(text: &str) -> Result<Circuit> {
    let mut builder = CircuitBuilder::new();
    for (index, line) in text.lines().enumerate() {
        parse_line(&mut builder, line).with_context(|| format!("netlist line {}", index + 1))?;
    }
    builder.build()
}

fn parse_line(builder: &mut CircuitBuilder, line: &str) -> Result<()> {
    let line = line.split('#').next().unwrap_or("");
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(());
    };
    match keyword {
        "input" | "output" => {
            let name = tokens
                .next()
                .ok_or_else(|| anyhow!("missing wire name after `{keyword}`"))?;
            ensure!(
                tokens.next().is_none(),
                "trailing tokens after `{keyword} {name}`"
            );
            if keyword == "input" {
                builder.add_input(name)?;
            } else {
                builder.mark_output(name)?;
            }
        }
        _ => {
            let kind = gate_kind(keyword)
                .ok_or_else(|| anyhow!("unknown gate type `{keyword}`"))?;
            let output = tokens
                .next()
                .ok_or_else(|| anyhow!("missing output wire for `{keyword}` gate"))?;
            let inputs: Vec<&str> = tokens.collect();
            builder.add_gate(kind, output, &inputs)?;
        }
    }
    Ok(())
}

fn gate_kind(keyword: &str) -> Option<GateKind> {
    match keyword {
        "and" => Some(GateKind::And),
        "or" => Some(GateKind::Or),
        "nand" => Some(GateKind::Nand),
        "nor" => Some(GateKind::Nor),
        "not" => Some(GateKind::Not),
        "buf" => Some(GateKind::Buf),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_half_adder_carry() {
        let circuit = parse(
            "# carry\n\
             input a\n\
             input b\n\
             and c a b   # the carry bit\n\
             output c\n",
        )
        .unwrap();
        assert_eq!(circuit.inputs.len(), 2);
        assert_eq!(circuit.outputs.len(), 1);
        assert_eq!(circuit.wires.len(), 3);
        // The AND gate plus the PO observation pseudo-gate.
        assert_eq!(circuit.gates.len(), 2);
    }

    #[test]
    fn test_error_carries_line_number() {
        let err = parse("input a\nxor z a a\noutput z\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"));
    }

    #[test]
    fn test_rejects_missing_operands() {
        assert!(parse("input\n").is_err());
        assert!(parse("and z\n").is_err());
    }
}

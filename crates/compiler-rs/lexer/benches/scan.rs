use criterion::{criterion_group, criterion_main, Criterion};
use lexer::{tokenize, Scanner};

const PROGRAM: &str = r#"
program Bench;
type
  Point = record x, y: integer; end;
  Grid = array [1..64, 1..64] of Point;
var
  g: Grid;
  i, j: integer;
  total: integer = 0;
{ fill the grid }
begin
  for i := 1 to 64 do
    for j := 1 to 64 do
    begin
      g[i, j].x := i * $10 + &7;
      g[i, j].y := (j shl 2) - %101;
      total += g[i, j].x div 3;
    end;
  (* report *)
  writeln('total = ', total, 1.5e2);
end.
"#;

// ---------------------------------------------------------------------------
// Scanner throughput
// ---------------------------------------------------------------------------

fn bench_tokenize_program(c: &mut Criterion) {
    c.bench_function("tokenize_program", |b| {
        b.iter(|| tokenize(std::hint::black_box(PROGRAM)));
    });
}

fn bench_scanner_iterator(c: &mut Criterion) {
    let source = PROGRAM.repeat(32);
    c.bench_function("scanner_iterate_large_source", |b| {
        b.iter(|| Scanner::new(&source).filter(Result::is_ok).count());
    });
}

criterion_group!(benches, bench_tokenize_program, bench_scanner_iterator);
criterion_main!(benches);

use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, SamplingMode, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};

use pgmirror::catalog::{DatabaseDef, IndexDef, MemoryCatalog, SchemaDef, TableDef};
use pgmirror::system_catalog::iterate::{iterate_current_database, Callbacks};
use pgmirror::system_catalog::oid::derive_oid;
use pgmirror::{CatalogConfig, QueryContext, Registry};

fn gen_catalog(schemas: usize, tables_per_schema: usize, seed: u64) -> MemoryCatalog {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut defs = Vec::with_capacity(schemas);
    for s in 0..schemas {
        let mut tables = Vec::with_capacity(tables_per_schema);
        for t in 0..tables_per_schema {
            let ncols = 2 + (rng.gen::<u32>() % 8) as usize;
            let cols: Vec<String> = (0..ncols).map(|c| format!("c{}", c)).collect();
            let col_refs: Vec<&str> = cols.iter().map(|c| c.as_str()).collect();
            let mut table = TableDef::new(&format!("t{}_{}", s, t), &col_refs)
                .with_index(IndexDef::new("PRIMARY", true, &col_refs[..1]));
            for i in 0..(rng.gen::<u32>() % 3) as usize {
                let k = 1 + (rng.gen::<u32>() as usize % (ncols - 1));
                table = table.with_index(IndexDef::new(&format!("t{}_{}_ix{}", s, t, i), false, &col_refs[k..=k]));
            }
            tables.push(table);
        }
        defs.push(SchemaDef::new(&format!("s{}", s), tables));
    }
    MemoryCatalog::with_databases(vec![DatabaseDef::multi("bench", defs)])
}

fn bench_derive_oid(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive_oid");
    group.bench_function("index_components", |b| {
        b.iter(|| derive_oid(&["bench", "public", "orders", "orders_customer_id_idx"]))
    });
    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let sizes = [(4usize, 250usize), (16, 1_000)];
    let mut group = c.benchmark_group("traversal");
    group.sampling_mode(SamplingMode::Flat);
    group.sample_size(20);
    let registry = Registry::with_defaults(&CatalogConfig::default());

    for &(schemas, tables) in &sizes {
        let ctx = QueryContext::new(Arc::new(gen_catalog(schemas, tables, 0xABCD_1234)), "bench");
        let label = format!("{}x{}", schemas, tables);
        group.throughput(Throughput::Elements((schemas * tables) as u64));

        group.bench_with_input(BenchmarkId::new("visit_all", &label), &ctx, |b, ctx| {
            b.iter(|| {
                let mut n = 0usize;
                let mut cbs = Callbacks::new().on_index(|_, _, _, _| {
                    n += 1;
                    Ok(true)
                });
                iterate_current_database(ctx, &mut cbs).unwrap();
                drop(cbs);
                n
            });
        });

        let pg_index = registry.lookup_from_str("pg_catalog.pg_index").unwrap();
        group.bench_with_input(BenchmarkId::new("pg_index_build", &label), &ctx, |b, ctx| {
            b.iter(|| pg_index.build(ctx).unwrap().height());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_derive_oid, bench_traversal);
criterion_main!(benches);

//! Round-trip validation for topic XML
//!
//! These tests parse real topic documents into the editing tree,
//! serialize the tree back out, and check that the two documents are
//! equal once formatting whitespace is normalized away. Structural
//! assertions on the intermediate tree mirror what hosts rely on.

use rubric_core::{Node, normalize, parse, serialize};

/// Test the smallest useful concept topic
#[test]
fn test_minimal_concept_round_trip() {
    let input = r#"
      <concept id="c1">
        <title>Titre du concept</title>
        <conbody>
          <p>Hello world</p>
        </conbody>
      </concept>
    "#;

    let roots = parse(input).unwrap();
    let output = serialize(&roots);

    assert_eq!(normalize(&output), normalize(input));
}

/// Test a complete concept with title, shortdesc, prolog and conbody
#[test]
fn test_complete_concept_round_trip() {
    let input = r#"
      <concept id="c99">
        <title>Mon concept avancé</title>
        <shortdesc>Un résumé court ici.</shortdesc>
        <prolog>
          <author>Christophe</author>
          <critdates>
            <created date="2025-01-01" />
          </critdates>
          <metadata>
            <audience>expert</audience>
          </metadata>
        </prolog>
        <conbody>
          <p>Texte principal…</p>
          <section>
            <title>Section A</title>
            <p>Contenu section A</p>
          </section>
        </conbody>
      </concept>
    "#;

    let roots = parse(input).unwrap();

    let Node::Concept { children, .. } = &roots[0] else {
        panic!("expected a concept root, got {:?}", roots[0]);
    };
    assert!(matches!(children[0], Node::Title { .. }));
    assert!(matches!(children[1], Node::Shortdesc { .. }));
    assert!(matches!(children[2], Node::Prolog { .. }));
    assert!(matches!(children[3], Node::ConceptBody { .. }));

    let output = serialize(&roots);
    assert_eq!(normalize(&output), normalize(input));
}

/// Test nested sections several levels deep
#[test]
fn test_nested_sections_round_trip() {
    let input = r#"
    <concept id="deep">
      <title>Concept profond</title>
      <conbody>
        <section id="s1">
          <title>Niveau 1</title>
          <section id="s1a">
            <title>Niveau 2</title>
            <p>Texte niveau 2</p>
          </section>
        </section>
      </conbody>
    </concept>
  "#;

    let roots = parse(input).unwrap();

    let conbody = roots[0]
        .children()
        .iter()
        .find(|n| matches!(n, Node::ConceptBody { .. }))
        .expect("conbody missing from the parsed tree");
    let level1 = conbody
        .children()
        .iter()
        .find(|n| matches!(n, Node::Section { .. }))
        .expect("level 1 section missing");
    assert!(
        level1
            .children()
            .iter()
            .any(|n| matches!(n, Node::Section { .. })),
        "nested section missing"
    );

    let output = serialize(&roots);
    assert_eq!(normalize(&output), normalize(input));
}

/// Test that no shortdesc gets invented when the input has none
#[test]
fn test_concept_without_shortdesc_round_trip() {
    let input = r#"
      <concept id="noShortdesc">
        <title>Sans résumé</title>
        <conbody>
          <p>Contenu simple.</p>
        </conbody>
      </concept>
    "#;

    let roots = parse(input).unwrap();
    assert!(
        !roots[0]
            .children()
            .iter()
            .any(|n| matches!(n, Node::Shortdesc { .. })),
        "a shortdesc appeared out of nowhere"
    );

    let output = serialize(&roots);
    assert_eq!(normalize(&output), normalize(input));
}

/// Test that codeblock content survives untouched, whitespace included
#[test]
fn test_codeblock_round_trip() {
    let input = r#"
      <codeblock language="javascript">
        console.log('Hello');
      </codeblock>
    "#;

    let roots = parse(input).unwrap();

    let Node::Codeblock { language, children } = &roots[0] else {
        panic!("expected a codeblock root, got {:?}", roots[0]);
    };
    assert_eq!(language.as_deref(), Some("javascript"));
    let text = children[0].as_text().expect("verbatim text child");
    assert!(text.contains("console.log('Hello');"));
    assert!(
        text.starts_with('\n') && text.ends_with(' '),
        "surrounding whitespace was not preserved: {text:?}"
    );

    let output = serialize(&roots);
    assert_eq!(normalize(&output), normalize(input));
}

/// Test a simple two-column table with a header row
#[test]
fn test_simple_table_round_trip() {
    let input = r#"
    <table xml:id="t1">
      <tgroup cols="2">
        <thead>
          <row>
            <entry align="center">A</entry>
            <entry>B</entry>
          </row>
        </thead>
        <tbody>
          <row>
            <entry align="left">1</entry>
            <entry align="left">2</entry>
          </row>
        </tbody>
      </tgroup>
    </table>
  "#;

    let roots = parse(input).unwrap();
    let output = serialize(&roots);

    assert_eq!(normalize(&output), normalize(input));
}

/// Test a reference topic with prolog and refbody
#[test]
fn test_reference_round_trip() {
    let input = r#"
    <reference id="r1">
      <title>Titre ref</title>
      <prolog>
        <author>Christophe</author>
      </prolog>
      <refbody>
        <section>
          <p>Du contenu.</p>
        </section>
      </refbody>
    </reference>
  "#;

    let roots = parse(input).unwrap();
    let output = serialize(&roots);

    assert_eq!(normalize(&output), normalize(input));
}

/// Test a task topic with steps
#[test]
fn test_task_round_trip() {
    let input = r#"
    <task id="t1">
      <title>Configurer la base</title>
      <prolog>
        <author>Christophe</author>
      </prolog>
      <taskbody>
        <steps>
          <step>
            <p>Ouvrir l'application.</p>
          </step>
          <step>
            <p>Cliquer sur Paramètres.</p>
          </step>
        </steps>
      </taskbody>
    </task>
  "#;

    let roots = parse(input).unwrap();

    assert!(matches!(roots[0], Node::Task { .. }));
    assert!(
        roots[0]
            .children()
            .iter()
            .any(|n| matches!(n, Node::TaskBody { .. })),
        "taskbody missing from the parsed tree"
    );

    let output = serialize(&roots);
    assert_eq!(normalize(&output), normalize(input));
}

/// Test an example block with its title attribute
#[test]
fn test_example_round_trip() {
    let input = r#"
    <example title="Mon exemple">
      <p>Ceci est un exemple.</p>
      <note>Attention !</note>
    </example>
  "#;

    let roots = parse(input).unwrap();

    let Node::Example { title, .. } = &roots[0] else {
        panic!("expected an example root, got {:?}", roots[0]);
    };
    assert_eq!(title.as_deref(), Some("Mon exemple"));

    let output = serialize(&roots);
    assert_eq!(normalize(&output), normalize(input));
}

/// Test a figure holding a title and an image
#[test]
fn test_figure_round_trip() {
    let input = r#"
    <figure>
      <title>Capture d'écran</title>
      <image src="screen.png" />
    </figure>
  "#;

    let roots = parse(input).unwrap();

    let children = roots[0].children();
    assert!(children.iter().any(|n| matches!(n, Node::Title { .. })));
    assert!(children.iter().any(|n| matches!(n, Node::Image { .. })));

    let output = serialize(&roots);
    assert_eq!(normalize(&output), normalize(input));
}

/// Test an atomic glossary entry
#[test]
fn test_glossary_entry_round_trip() {
    let input = r#"
    <glossentry termid="G1" term="Cloud" definition="Ressources distantes." />
  "#;

    let roots = parse(input).unwrap();

    let Node::GlossaryEntry { termid, term, .. } = &roots[0] else {
        panic!("expected a glossary entry root, got {:?}", roots[0]);
    };
    assert_eq!(termid.as_deref(), Some("G1"));
    assert_eq!(term.as_deref(), Some("Cloud"));

    let output = serialize(&roots);
    assert_eq!(normalize(&output), normalize(input));
}

/// Test a cross reference with its label
#[test]
fn test_cross_reference_round_trip() {
    let input = r#"
    <xref refid="C99">Voir la rubrique</xref>
  "#;

    let roots = parse(input).unwrap();

    let Node::CrossReference { refid, text } = &roots[0] else {
        panic!("expected a cross reference root, got {:?}", roots[0]);
    };
    assert_eq!(refid.as_deref(), Some("C99"));
    assert_eq!(text, "Voir la rubrique");

    let output = serialize(&roots);
    assert_eq!(normalize(&output), normalize(input));
}

/// Test a doc-tag and its single text child
#[test]
fn test_doc_tag_round_trip() {
    let input = r#"
    <doc-tag type="audience">Expert</doc-tag>
  "#;

    let roots = parse(input).unwrap();

    let Node::DocTag { tag_type, children } = &roots[0] else {
        panic!("expected a doc-tag root, got {:?}", roots[0]);
    };
    assert_eq!(tag_type.as_deref(), Some("audience"));
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].as_text(), Some("Expert"));

    let output = serialize(&roots);
    assert_eq!(normalize(&output), normalize(input));
}

/// Test an inline variable
#[test]
fn test_inline_variable_round_trip() {
    let input = r#"
    <variable name="VERSION" />
  "#;

    let roots = parse(input).unwrap();

    let Node::Variable { name } = &roots[0] else {
        panic!("expected a variable root, got {:?}", roots[0]);
    };
    assert_eq!(name.as_deref(), Some("VERSION"));

    let output = serialize(&roots);
    assert_eq!(normalize(&output), normalize(input));
}

/// Test a full concept document mixing inline and block structures
#[test]
fn test_full_concept_document_round_trip() {
    let input = r#"
    <concept id="full1">
      <title>Concept complet</title>
      <shortdesc>Résumé du concept.</shortdesc>
      <prolog>
        <author>Christophe</author>
        <critdates>
          <created date="2025-01-01" />
        </critdates>
        <metadata>
          <audience>expert</audience>
        </metadata>
      </prolog>
      <conbody>
        <p>
          Introduction avec une
          <doc-tag type="audience">Admin</doc-tag>
          et une variable
          <variable name="VERSION" />
          ainsi qu'un lien
          <xref refid="REF1">Voir référence</xref>.
        </p>

        <section id="s1">
          <title>Section principale</title>
          <p>Texte dans la section principale.</p>

          <example title="Exemple d'utilisation">
            <p>Ceci est un exemple.</p>
          </example>

          <figure>
            <title>Schéma général</title>
            <image src="schema.png" />
          </figure>

          <codeblock language="javascript">
            console.log("Hello world");
          </codeblock>

          <table xml:id="t1">
            <tgroup cols="2">
              <thead>
                <row>
                  <entry align="center">Col1</entry>
                  <entry>Col2</entry>
                </row>
              </thead>
              <tbody>
                <row>
                  <entry align="left">V1</entry>
                  <entry align="left">V2</entry>
                </row>
              </tbody>
            </tgroup>
          </table>

          <note>Note importante.</note>

          <question>Quelle est la bonne réponse ?</question>
          <answer>C'est celle-ci.</answer>

          <glossentry termid="G1" term="Cloud" definition="Infrastructures distantes." />
        </section>
      </conbody>
    </concept>
  "#;

    let roots = parse(input).unwrap();

    assert!(matches!(roots[0], Node::Concept { .. }));
    assert!(
        roots[0]
            .children()
            .iter()
            .any(|n| matches!(n, Node::ConceptBody { .. }))
    );

    let output = serialize(&roots);
    assert_eq!(normalize(&output), normalize(input));
}

/// Test a deeply nested stress document with lists and a wide table
#[test]
fn test_stress_concept_round_trip() {
    let input = r#"
    <concept id="mega1">
      <title>Concept Ultra Complet</title>
      <shortdesc>Document de test très complet.</shortdesc>

      <prolog>
        <author>Christophe</author>
        <critdates>
          <created date="2025-02-13" />
          <revised modified="2025-03-01" />
        </critdates>
        <metadata>
          <audience>expert</audience>
          <category>advanced</category>
        </metadata>
      </prolog>

      <conbody>

        <p>
          Ceci est un paragraphe introductif avec plusieurs éléments inline :
          <doc-tag type="audience">Admin</doc-tag>,
          <variable name="VERSION" />,
          une référence interne
          <xref refid="REF42">voir section 2</xref>
          et même une deuxième
          <xref refid="REF99">aller plus loin</xref>.
        </p>

        <section id="sA">
          <title>Section A — Présentation générale</title>

          <p>Texte simple avec une variable <variable name="PRODUIT" />.</p>

          <note>Note informative dans la Section A.</note>

          <p>Liste non ordonnée :</p>
          <itemizedlist>
            <listitem><p>Premier item</p></listitem>
            <listitem><p>Deuxième item</p></listitem>
            <listitem><p>Troisième item</p></listitem>
          </itemizedlist>

          <section id="sA1">
            <title>Section A.1 — Détails</title>

            <p>
              Dans cette section, nous insérons un exemple :
            </p>

            <example title="Cas d'utilisation">
              <p>Un exemple très instructif.</p>
              <note>Note interne à l'exemple.</note>
            </example>

            <figure>
              <title>Schéma A.1</title>
              <image src="schema_A1.png" />
            </figure>

            <codeblock language="javascript">
              // Exemple de code
              const message = "Hello 'world'";
              console.log(message);
            </codeblock>

            <orderedlist>
              <listitem><p>Étape 1</p></listitem>
              <listitem><p>Étape 2</p></listitem>
              <listitem><p>Étape 3</p></listitem>
            </orderedlist>

            <section id="sA1a">
              <title>Section A.1.a — Sous-détails</title>

              <note>Note profonde dans l'imbrication.</note>

              <p>Une variable : <variable name="DEEP_VAR" /> et un doc-tag <doc-tag type="feature">AUTH</doc-tag></p>

              <p>Fin de la sous-section.</p>
            </section>

          </section>
        </section>

        <section id="sB">
          <title>Section B — Exemples avancés</title>

          <table xml:id="tMega">
            <tgroup cols="3">
              <thead>
                <row>
                  <entry align="center">Col1</entry>
                  <entry align="center">Col2</entry>
                  <entry align="center">Col3</entry>
                </row>
                <row>
                  <entry>A</entry>
                  <entry>B</entry>
                  <entry>C</entry>
                </row>
              </thead>
              <tbody>
                <row>
                  <entry align="left">1</entry>
                  <entry align="left">2</entry>
                  <entry align="left">3</entry>
                </row>
                <row>
                  <entry align="left">4</entry>
                  <entry align="left">5</entry>
                  <entry align="left">6</entry>
                </row>
              </tbody>
            </tgroup>
          </table>

          <question>Quel est l'intérêt de ce test ?</question>
          <answer>Vérifier que tout fonctionne parfaitement.</answer>

          <glossentry termid="G42" term="Test" definition="Processus de vérification." />
        </section>

      </conbody>
    </concept>
  "#;

    let roots = parse(input).unwrap();
    let output = serialize(&roots);

    assert_eq!(normalize(&output), normalize(input));
}

/// Test the maximal stress document: every structure at once
#[test]
fn test_maximal_stress_round_trip() {
    let input = r#"
    <concept id="MAX99">
      <title>Rubrique — Test maximal</title>
      <shortdesc>Test de validation complet de toutes les structures DITA + extensions internes.</shortdesc>

      <prolog>
        <author>Christophe</author>
        <critdates>
          <created date="2025-02-13" />
          <modified date="2025-03-01" />
        </critdates>
        <metadata>
          <audience>expert</audience>
          <product>PLA</product>
          <feature>AUTH</feature>
          <keywords>test,full,dita</keywords>
        </metadata>
      </prolog>

      <conbody>

        <p>
          Ceci est un paragraphe avec plusieurs éléments inline :
          <doc-tag type="audience">Admin</doc-tag>,
          une variable <variable name="VERSION" />,
          un lien interne <xref refid="REF-INTRO">voir introduction</xref>,
          et un second lien <xref refid="REF-DETAIL">détails plus bas</xref>.
        </p>

        <section id="S1">
          <title>Section 1 — Présentation générale</title>

          <p>Texte introductif dans la section 1.</p>

          <note>Note importante placée dans S1.</note>

          <p>Une liste non ordonnée :</p>
          <itemizedlist>
            <listitem><p>Premier item</p></listitem>
            <listitem><p>Deuxième item</p></listitem>
            <listitem><p>Troisième item</p></listitem>
          </itemizedlist>

          <section id="S1A">
            <title>Section 1.A — Détails avancés</title>

            <p>Texte dans 1.A, avec variable <variable name="VAR_A" />.</p>

            <example title="Cas d'utilisation réel">
              <p>Dans cet exemple, nous montrons un cas d'utilisation complet.</p>
              <note>Note interne à l'exemple.</note>
            </example>

            <figure>
              <title>Schéma d'utilisation</title>
              <image src="schema_global.png" />
            </figure>

            <codeblock language="javascript">
              // Exemple de code complexe
              const a = 10;
              const b = "texte avec 'apostrophes' et % caractères spéciaux";
              function test() {
                console.log(a, b);
              }
              test();
            </codeblock>

            <orderedlist>
              <listitem><p>Étape 1</p></listitem>
              <listitem><p>Étape 2</p></listitem>
              <listitem><p>Étape 3</p></listitem>
            </orderedlist>

            <section id="S1A1">
              <title>Section 1.A.1 — Sous-détails</title>

              <note>Note très profonde dans l'arborescence.</note>

              <p>
                Texte riche : variable <variable name="DEEP_VAR" />,
                doc-tag <doc-tag type="feature">GESTION</doc-tag>,
                lien <xref refid="REF-DEEP">profondeur</xref>.
              </p>

              <p>Fin de la sous-section 1.A.1.</p>
            </section>
          </section>
        </section>

        <section id="S2">
          <title>Section 2 — Tableaux avancés</title>

          <table xml:id="T99">
            <tgroup cols="3">

              <thead>
                <row>
                  <entry align="center">ColA</entry>
                  <entry align="center">ColB</entry>
                  <entry align="center">ColC</entry>
                </row>
                <row>
                  <entry>HA</entry>
                  <entry>HB</entry>
                  <entry>HC</entry>
                </row>
              </thead>

              <tbody>
                <row>
                  <entry align="left">1</entry>
                  <entry align="left">2</entry>
                  <entry align="left">3</entry>
                </row>
                <row>
                  <entry align="left">4</entry>
                  <entry align="left">5</entry>
                  <entry align="left">6</entry>
                </row>
              </tbody>

            </tgroup>
          </table>

          <question>Pourquoi ce test existe-t-il ?</question>
          <answer>Pour vérifier 100 % du pipeline XML → arbre → XML.</answer>

          <glossentry termid="G-ULTIME" term="UltraTest" definition="Test complet de tous les éléments DITA." />
        </section>

      </conbody>
    </concept>
  "#;

    let roots = parse(input).unwrap();
    let output = serialize(&roots);

    assert_eq!(normalize(&output), normalize(input));
}

/// Test all three topic types against the same pipeline
#[test]
fn test_mixed_topic_types_round_trip() {
    let input_concept = r#"
    <concept id="C100">
      <title>Concept général</title>
      <shortdesc>Résumé du concept.</shortdesc>
      <prolog>
        <author>Christophe</author>
      </prolog>
      <conbody>
        <p>Introduction au concept avec une variable <variable name="V_CONC" />.</p>
        <section id="SC1">
          <title>Section concept</title>
          <p>Détails du concept.</p>
          <note>Note informative liée au concept.</note>
        </section>
      </conbody>
    </concept>
  "#;

    let input_task = r#"
    <task id="T200">
      <title>Tâche principale</title>
      <prolog>
        <author>Christophe</author>
      </prolog>
      <taskbody>
        <steps>
          <step><p>Étape 1 de la tâche.</p></step>
          <step><p>Étape 2 avec une variable <variable name="V_TASK" />.</p></step>
        </steps>
      </taskbody>
    </task>
  "#;

    let input_reference = r#"
    <reference id="R300">
      <title>Référence fonctionnelle</title>
      <prolog>
        <author>Christophe</author>
      </prolog>
      <refbody>
        <section id="SR1">
          <title>Section de référence</title>
          <p>Texte de référence incluant une balise <doc-tag type="audience">Admin</doc-tag>.</p>
          <figure>
            <title>Schéma de référence</title>
            <image src="schema_ref.png" />
          </figure>
          <codeblock language="javascript">console.log("Ref");</codeblock>
        </section>
      </refbody>
    </reference>
  "#;

    for input in [input_concept, input_task, input_reference] {
        let roots = parse(input).unwrap();
        let output = serialize(&roots);
        assert_eq!(normalize(&output), normalize(input));
    }
}

/// Test a bare paragraph fragment without any topic wrapper
#[test]
fn test_bare_paragraph_round_trip() {
    let input = "<p>Hello world</p>";

    let roots = parse(input).unwrap();
    let output = serialize(&roots);

    assert_eq!(output, "<p>Hello world</p>");
    assert_eq!(normalize(&output), normalize(input));
}

/// Test that a body wrapper dissolves into its children
#[test]
fn test_body_wrapper_flattens() {
    let input = r#"
      <body>
        <title>Titre</title>
        <p>Texte</p>
      </body>
    "#;

    let roots = parse(input).unwrap();
    assert_eq!(roots.len(), 2);

    let output = serialize(&roots);
    assert_eq!(
        normalize(&output),
        normalize("<title>Titre</title>\n<p>Texte</p>")
    );
}

/// Test a learning topic built from the learning container kinds
#[test]
fn test_learning_topic_round_trip() {
    let input = r#"
      <learningContent id="lc1">
        <title>Module de formation</title>
        <learningBody id="lb1">
          <learningSummary id="ls1">
            <p>Résumé du module.</p>
          </learningSummary>
          <learningContentBody id="lcb1">
            <p>Contenu pédagogique.</p>
            <note>Pensez à valider le quiz.</note>
          </learningContentBody>
          <learningAssessment id="la1" mode="quiz">
            <question>Quelle est la bonne réponse ?</question>
            <answer id="a1" correct="true">Celle-ci.</answer>
            <answer id="a2">Pas celle-là.</answer>
          </learningAssessment>
        </learningBody>
      </learningContent>
    "#;

    let roots = parse(input).unwrap();

    // the whole topic stays one root, learning wrappers do not flatten
    assert_eq!(roots.len(), 1);
    let Node::LearningContent { id, children } = &roots[0] else {
        panic!("expected a learning content root, got {:?}", roots[0]);
    };
    assert_eq!(id.as_deref(), Some("lc1"));
    assert!(children.iter().any(|n| matches!(n, Node::LearningBody { .. })));

    let output = serialize(&roots);
    assert_eq!(normalize(&output), normalize(input));
}

/// Test a steps fragment used on its own
#[test]
fn test_steps_fragment_round_trip() {
    let input = r#"
      <steps>
        <step><p>Étape 1</p></step>
        <step><p>Étape 2</p></step>
      </steps>
    "#;

    let roots = parse(input).unwrap();
    let output = serialize(&roots);

    assert_eq!(normalize(&output), normalize(input));
}

/// Test that a full document keeps round-tripping once it has already
/// been through the pipeline (output is a fixed point)
#[test]
fn test_serialized_output_is_a_fixed_point() {
    let input = r#"
      <concept id="c1">
        <title>Titre du concept</title>
        <conbody>
          <p>Hello world</p>
        </conbody>
      </concept>
    "#;

    let first = serialize(&parse(input).unwrap());
    let second = serialize(&parse(&first).unwrap());

    assert_eq!(first, second, "pretty-printed output must be stable");
}
